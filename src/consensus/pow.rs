//! Proof-of-work targets
//!
//! Conversions between the compact `bits` encoding and full 256-bit
//! targets, and the basic "hash at or under target" check.

use primitive_types::U256;

use crate::crypto::Hash;

/// Largest target allowed, `~0 >> shift`
pub fn pow_limit(shift: usize) -> U256 {
    U256::MAX >> shift
}

/// Interpret a hash as a 256-bit integer
pub fn hash_to_u256(hash: &Hash) -> U256 {
    U256::from_little_endian(hash.as_bytes())
}

/// Convert compact difficulty to 256-bit target
///
/// Returns `None` for zero, negative, or overflowing encodings.
pub fn compact_to_target(compact: u32) -> Option<U256> {
    let size = (compact >> 24) as usize;
    let mantissa = compact & 0x007f_ffff;
    let negative = compact & 0x0080_0000 != 0;

    if mantissa == 0 || negative {
        return None;
    }

    let overflow =
        size > 34 || (mantissa > 0xff && size > 33) || (mantissa > 0xffff && size > 32);
    if overflow {
        return None;
    }

    let target = if size <= 3 {
        U256::from(mantissa >> (8 * (3 - size)))
    } else {
        U256::from(mantissa) << (8 * (size - 3))
    };

    if target.is_zero() {
        None
    } else {
        Some(target)
    }
}

/// Convert 256-bit target to compact difficulty
pub fn target_to_compact(target: U256) -> u32 {
    let mut size = (target.bits() + 7) / 8;
    let mut compact = if size <= 3 {
        (target.low_u64() << (8 * (3 - size))) as u32
    } else {
        (target >> (8 * (size - 3))).low_u64() as u32
    };

    // Keep the sign bit clear
    if compact & 0x0080_0000 != 0 {
        compact >>= 8;
        size += 1;
    }

    compact | ((size as u32) << 24)
}

/// Check that `hash` satisfies `bits` and that `bits` is within `limit`
pub fn check_proof_of_work(hash: &Hash, bits: u32, limit: U256) -> bool {
    match compact_to_target(bits) {
        Some(target) if target <= limit => hash_to_u256(hash) <= target,
        _ => false,
    }
}
