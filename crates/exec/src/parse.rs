use once_cell::sync::Lazy;
use regex::Regex;

/// Matches the learner's `average loss = <value>` report.
static AVERAGE_LOSS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"average loss\s*=\s*((?i:nan|[-+]?inf(?:inity)?)|[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)",
    )
    .expect("Invalid average loss regex")
});

/// Matches any decimal number with an optional exponent.
static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("Invalid number regex")
});

/// How a loss is recognized in captured output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LossPattern {
    /// A line containing `average loss = <value>`.
    #[default]
    AverageLoss,

    /// Any number; used when an external evaluator prints the loss.
    AnyNumber,
}

impl LossPattern {
    fn find(self, line: &str) -> Option<f64> {
        let text = match self {
            Self::AverageLoss => AVERAGE_LOSS.captures(line)?.get(1)?.as_str(),
            Self::AnyNumber => NUMBER.find(line)?.as_str(),
        };
        text.parse().ok()
    }
}

/// Extracts the loss from captured command output.
///
/// Lines are scanned from the end. A chained train-then-test run prints the
/// test loss after the training loss, and the test loss is the one that
/// counts, so the last matching line wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputParser {
    pattern: LossPattern,
}

impl OutputParser {
    /// Creates a parser with the given pattern.
    #[must_use]
    pub fn new(pattern: LossPattern) -> Self {
        Self { pattern }
    }

    /// Returns the pattern in use.
    #[must_use]
    pub fn pattern(&self) -> LossPattern {
        self.pattern
    }

    /// Returns the loss reported by the last matching line, if any.
    #[must_use]
    pub fn extract_loss<S: AsRef<str>>(&self, lines: &[S]) -> Option<f64> {
        lines
            .iter()
            .rev()
            .find_map(|line| self.pattern.find(line.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const VW_OUTPUT: &[&str] = &[
        "Num weight bits = 18",
        "average  since         example        example  current  current  current",
        "0.693147 0.693147            1            1.0   1.0000   0.0000        5",
        "finished run",
        "average loss = 0.512346",
        "best constant = 0.25",
        "average loss = 4.6e-02 h",
        "total feature number = 1234",
    ];

    #[test]
    fn last_average_loss_wins() {
        let parser = OutputParser::default();

        let loss = parser.extract_loss(VW_OUTPUT).expect("loss present");

        assert_relative_eq!(loss, 0.046);
    }

    #[test]
    fn average_loss_accepts_non_finite_reports() {
        let parser = OutputParser::default();

        let loss = parser.extract_loss(&["average loss = nan"]).expect("loss present");
        assert!(loss.is_nan());

        let loss = parser.extract_loss(&["average loss = inf"]).expect("loss present");
        assert!(loss.is_infinite());
    }

    #[test]
    fn average_loss_ignores_other_numbers() {
        let parser = OutputParser::default();

        assert_eq!(parser.extract_loss(&["loss 0.5", "12 34"]), None);
        assert_eq!(parser.extract_loss::<&str>(&[]), None);
    }

    #[test]
    fn any_number_takes_first_number_of_last_matching_line() {
        let parser = OutputParser::new(LossPattern::AnyNumber);

        let lines = ["auc: 0.91", "rmse 1.5e-1 over 300 rows", "done"];

        assert_relative_eq!(parser.extract_loss(&lines).unwrap(), 0.15);
        assert_relative_eq!(parser.extract_loss(&["-.25"]).unwrap(), -0.25);
        assert_eq!(parser.extract_loss(&["no digits here"]), None);
    }
}
