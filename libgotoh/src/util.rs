#[cfg(test)]
#[ctor::ctor]
fn init_backtrace() {
    color_backtrace::install();
}

/// The error of `observed` relative to `expected`.
///
/// When `expected` is zero there is nothing to scale by, so the absolute difference is returned.
pub fn relative_error(observed: f64, expected: f64) -> f64 {
    let difference = (observed - expected).abs();
    if expected == 0.0 {
        difference
    } else {
        difference / expected.abs()
    }
}
