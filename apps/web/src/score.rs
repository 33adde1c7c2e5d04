#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScoreLabel {
    Low,
    BelowAverage,
    Average,
    AboveAverage,
    Top,
}

impl ScoreLabel {
    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            Self::Top
        } else if score >= 7.0 {
            Self::AboveAverage
        } else if score >= 5.0 {
            Self::Average
        } else if score >= 3.0 {
            Self::BelowAverage
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Top => "топ",
            Self::AboveAverage => "выше среднего",
            Self::Average => "средний",
            Self::BelowAverage => "ниже среднего",
            Self::Low => "низкий",
        }
    }
}

pub fn label_for_score(score: f64) -> &'static str {
    ScoreLabel::from_score(score).label()
}

/// Progress bar width in percent: ten points per score unit, clamped to 0..=100.
pub fn progress_percent(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    (score * 10.0).clamp(0.0, 100.0)
}

/// Lenient attribute parsing: skips leading whitespace and reads the longest
/// numeric prefix, so `"7.5 pts"` yields 7.5. Anything else yields 0.
pub fn parse_attribute(raw: Option<&str>) -> f64 {
    raw.and_then(parse_leading_float)
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn parse_leading_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let end = numeric_prefix_len(trimmed.as_bytes());
    trimmed[..end].parse().ok()
}

/// Length of the longest prefix matching `[+-]? digits? (. digits?)? ([eE] [+-]? digits)?`
/// that holds at least one mantissa digit, or 0.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer = digits_from(end);
    end += integer;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if integer > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }
    if integer == 0 && fraction == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }
    end
}
