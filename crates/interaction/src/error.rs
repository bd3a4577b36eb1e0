/// Malformed input rejected at the gesture boundary.
///
/// Rejected input never reaches `ViewState`: a single NaN rotation would
/// poison every later frame.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    NonFinitePointer { x: f64, y: f64 },
    NonFiniteWheel { delta_y: f64 },
    InvalidViewport { width: f64, height: f64 },
    NonFiniteTime { seconds: f64 },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::NonFinitePointer { x, y } => {
                write!(f, "pointer position is not finite: ({x}, {y})")
            }
            InputError::NonFiniteWheel { delta_y } => {
                write!(f, "wheel delta is not finite: {delta_y}")
            }
            InputError::InvalidViewport { width, height } => {
                write!(f, "viewport must be finite and positive: {width}x{height}")
            }
            InputError::NonFiniteTime { seconds } => {
                write!(f, "timestamp is not finite: {seconds}")
            }
        }
    }
}

impl std::error::Error for InputError {}
