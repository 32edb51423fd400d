//! Per-type extrapolation hook

/// Produce the anticipated next value from two observations
///
/// `previous` is the value currently held by the anticipator and `current`
/// is the pattern-matched prediction. Implement this for any value type an
/// [`Anticipator`](crate::Anticipator) should hold.
pub trait PredictNext: Sized {
    fn predict_next(previous: Self, current: Self) -> Self;
}

macro_rules! impl_linear_float {
    ($($t:ty),*) => {
        $(
            impl PredictNext for $t {
                fn predict_next(previous: Self, current: Self) -> Self {
                    current + (current - previous)
                }
            }
        )*
    };
}

macro_rules! impl_linear_int {
    ($($t:ty),*) => {
        $(
            impl PredictNext for $t {
                fn predict_next(previous: Self, current: Self) -> Self {
                    current.saturating_add(current.saturating_sub(previous))
                }
            }
        )*
    };
}

impl_linear_float!(f32, f64);
impl_linear_int!(i32, i64);
