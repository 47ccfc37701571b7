/// The parts of an open pull request the dependency gate cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
    pub number: u64,
    pub labels: Vec<String>,
}

impl PullRequestSummary {
    pub fn new(number: u64, labels: &[&str]) -> Self {
        PullRequestSummary {
            number,
            labels: labels.iter().map(|label| label.to_string()).collect(),
        }
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_match_is_exact() {
        let pr = PullRequestSummary::new(7, &["dependencies-bot", "Dependencies"]);
        assert!(!pr.has_label("dependencies"));
        assert!(PullRequestSummary::new(8, &["dependencies"]).has_label("dependencies"));
    }
}
