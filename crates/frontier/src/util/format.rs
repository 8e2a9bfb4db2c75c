/// Format a decimal fraction as a percentage with two decimals
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a portfolio weight, already in percent
pub fn format_weight(weight: f64) -> String {
    format!("{weight:.2}%")
}

/// Format a Sharpe ratio, which may be infinite for riskless portfolios
pub fn format_sharpe(value: f64) -> String {
    if value.is_infinite() {
        "inf".to_string()
    } else {
        format!("{value:.4}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0712), "7.12%");
        assert_eq!(format_percentage(-0.005), "-0.50%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(33.333333), "33.33%");
        assert_eq!(format_weight(100.0), "100.00%");
    }

    #[test]
    fn test_format_sharpe() {
        assert_eq!(format_sharpe(0.53333), "0.5333");
        assert_eq!(format_sharpe(f64::INFINITY), "inf");
    }
}
