//! Visit scoring: bust and checkout evaluation.
//!
//! Darts are evaluated in submission order and the visit ends at the first
//! dart that busts or completes the checkout; that dart is kept, anything
//! after it is discarded. This truncation rule is shared by human submissions
//! and the bot simulator, so a persisted visit always reflects exactly the
//! darts that counted.

use super::dart::Dart;
use crate::errors::domain::{DomainError, ValidationKind};

/// Upper bound on darts per visit.
pub const MAX_DARTS_PER_VISIT: usize = 3;

/// Result of evaluating one visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitOutcome {
    /// The darts that counted (input truncated at a bust/checkout dart).
    pub darts: Vec<Dart>,
    /// Points credited to the player. Zero on a bust: the attempted total is
    /// discarded and must not pollute scoring averages.
    pub total_scored: i16,
    /// Score left after the visit; equals the starting score on a bust.
    pub remaining_after: i16,
    pub is_bust: bool,
    pub is_checkout: bool,
}

/// Evaluate a visit of 1..=3 darts against a remaining score.
///
/// Bust: the running remainder goes below zero, lands on exactly 1 (which no
/// ruleset can finish), or reaches zero under double-out without a finishing
/// double. Checkout: the remainder reaches zero otherwise.
pub fn score_visit(
    remaining_before: i16,
    darts: &[Dart],
    double_out: bool,
) -> Result<VisitOutcome, DomainError> {
    if darts.is_empty() || darts.len() > MAX_DARTS_PER_VISIT {
        return Err(DomainError::validation(
            ValidationKind::InvalidDart,
            format!(
                "a visit carries 1 to {MAX_DARTS_PER_VISIT} darts, got {}",
                darts.len()
            ),
        ));
    }
    if remaining_before < 2 {
        return Err(DomainError::validation(
            ValidationKind::LegOver,
            format!("no throw possible from a remaining score of {remaining_before}"),
        ));
    }

    let mut counted = Vec::with_capacity(darts.len());
    let mut running = remaining_before;

    for dart in darts {
        counted.push(*dart);
        let after = running - dart.value();

        if after < 0 || after == 1 {
            return Ok(VisitOutcome {
                darts: counted,
                total_scored: 0,
                remaining_after: remaining_before,
                is_bust: true,
                is_checkout: false,
            });
        }

        if after == 0 {
            if double_out && !dart.is_double() {
                return Ok(VisitOutcome {
                    darts: counted,
                    total_scored: 0,
                    remaining_after: remaining_before,
                    is_bust: true,
                    is_checkout: false,
                });
            }
            return Ok(VisitOutcome {
                darts: counted,
                total_scored: remaining_before,
                remaining_after: 0,
                is_bust: false,
                is_checkout: true,
            });
        }

        running = after;
    }

    Ok(VisitOutcome {
        darts: counted,
        total_scored: remaining_before - running,
        remaining_after: running,
        is_bust: false,
        is_checkout: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t20() -> Dart {
        Dart::treble(20).unwrap()
    }

    fn d20() -> Dart {
        Dart::double(20).unwrap()
    }

    #[test]
    fn plain_scoring_visit() {
        let out = score_visit(501, &[t20(), t20(), t20()], true).unwrap();
        assert!(!out.is_bust && !out.is_checkout);
        assert_eq!(out.total_scored, 180);
        assert_eq!(out.remaining_after, 321);
        assert_eq!(out.darts.len(), 3);
    }

    #[test]
    fn bust_below_zero_reverts_score() {
        let out = score_visit(40, &[t20(), t20(), t20()], true).unwrap();
        assert!(out.is_bust);
        assert_eq!(out.total_scored, 0);
        assert_eq!(out.remaining_after, 40);
        // Truncated at the busting dart.
        assert_eq!(out.darts.len(), 1);
    }

    #[test]
    fn landing_on_one_busts_either_ruleset() {
        for double_out in [true, false] {
            let out = score_visit(
                41,
                &[Dart::single(20).unwrap(), Dart::single(20).unwrap()],
                double_out,
            )
            .unwrap();
            assert!(out.is_bust, "double_out={double_out}");
            assert_eq!(out.remaining_after, 41);
            assert_eq!(out.darts.len(), 2);
        }
    }

    #[test]
    fn double_out_requires_finishing_double() {
        // 40 left, S20 S20 lands on zero without a double: bust.
        let out = score_visit(
            40,
            &[Dart::single(20).unwrap(), Dart::single(20).unwrap()],
            true,
        )
        .unwrap();
        assert!(out.is_bust);
        assert_eq!(out.darts.len(), 2);

        // Same darts, straight-out: checkout.
        let out = score_visit(
            40,
            &[Dart::single(20).unwrap(), Dart::single(20).unwrap()],
            false,
        )
        .unwrap();
        assert!(out.is_checkout);
        assert_eq!(out.remaining_after, 0);
    }

    #[test]
    fn checkout_ends_visit_early() {
        // D20 finishes on the first dart; the other two are discarded.
        let out = score_visit(40, &[d20(), t20(), t20()], true).unwrap();
        assert!(out.is_checkout);
        assert_eq!(out.darts, vec![d20()]);
        assert_eq!(out.total_scored, 40);
        assert_eq!(out.remaining_after, 0);
    }

    #[test]
    fn bull_finish_counts_as_double() {
        let out = score_visit(50, &[Dart::double(25).unwrap()], true).unwrap();
        assert!(out.is_checkout);
    }

    #[test]
    fn misses_score_nothing() {
        let out = score_visit(301, &[Dart::miss(), Dart::miss(), Dart::miss()], true).unwrap();
        assert!(!out.is_bust && !out.is_checkout);
        assert_eq!(out.total_scored, 0);
        assert_eq!(out.remaining_after, 301);
    }

    #[test]
    fn rejects_empty_and_oversized_visits() {
        assert!(score_visit(501, &[], true).is_err());
        assert!(score_visit(501, &[t20(), t20(), t20(), t20()], true).is_err());
    }

    #[test]
    fn rejects_unthrowable_remaining() {
        assert!(score_visit(1, &[t20()], true).is_err());
        assert!(score_visit(0, &[t20()], true).is_err());
    }
}
