use super::Comparator;
use crate::core::Verdict;

/// Classifies a comparison into a verdict
///
/// Added permissions always dominate removed ones.
pub struct Inspector;

impl Inspector {
    pub fn check(comparator: &Comparator) -> Verdict {
        let verdict = if !comparator.more().is_empty() {
            Verdict::Fail {
                more: comparator.more().clone(),
                less: comparator.less().clone(),
            }
        } else if !comparator.less().is_empty() {
            Verdict::PassWithAttention {
                less: comparator.less().clone(),
            }
        } else {
            Verdict::Pass
        };

        tracing::info!("Verdict: {}", verdict);
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Permission, PermissionSet};

    fn set(names: &[&str]) -> PermissionSet {
        names.iter().map(|n| Permission::new(*n)).collect()
    }

    #[test]
    fn test_unchanged_is_pass() {
        let old = set(&["X.Y"]);
        let verdict = Inspector::check(&Comparator::new(&old, &set(&["X.Y"])));
        assert_eq!(verdict, Verdict::Pass);
    }

    #[test]
    fn test_added_is_fail() {
        let verdict = Inspector::check(&Comparator::new(&set(&["X.Y"]), &set(&["X.Y", "A.B.C"])));
        assert_eq!(
            verdict,
            Verdict::Fail {
                more: set(&["A.B.C"]),
                less: PermissionSet::new(),
            }
        );
    }

    #[test]
    fn test_removed_is_pass_with_attention() {
        let verdict = Inspector::check(&Comparator::new(&set(&["X.Y", "A.B.C"]), &set(&["X.Y"])));
        assert_eq!(
            verdict,
            Verdict::PassWithAttention {
                less: set(&["A.B.C"]),
            }
        );
    }

    #[test]
    fn test_fail_takes_priority_over_removals() {
        let verdict = Inspector::check(&Comparator::new(&set(&["old.One"]), &set(&["new.One"])));
        assert_eq!(
            verdict,
            Verdict::Fail {
                more: set(&["new.One"]),
                less: set(&["old.One"]),
            }
        );
    }
}
