/// Minimum of two 32-bit integers.
#[inline(always)]
pub const fn min_i32(a: i32, b: i32) -> i32 {
    if a < b {
        a
    } else {
        b
    }
}

/// Maximum of two 32-bit integers.
#[inline(always)]
pub const fn max_i32(a: i32, b: i32) -> i32 {
    if a > b {
        a
    } else {
        b
    }
}

/// Minimum of two unsigned 32-bit integers.
#[inline(always)]
pub const fn min_u32(a: u32, b: u32) -> u32 {
    if a < b {
        a
    } else {
        b
    }
}

/// Maximum of two unsigned 32-bit integers.
#[inline(always)]
pub const fn max_u32(a: u32, b: u32) -> u32 {
    if a > b {
        a
    } else {
        b
    }
}

/// Clamp a 32-bit integer into `[lo, hi]`.
#[inline(always)]
pub const fn clamp_i32(x: i32, lo: i32, hi: i32) -> i32 {
    min_i32(max_i32(x, lo), hi)
}

/// Clamp an unsigned 32-bit integer into `[lo, hi]`.
#[inline(always)]
pub const fn clamp_u32(x: u32, lo: u32, hi: u32) -> u32 {
    min_u32(max_u32(x, lo), hi)
}
