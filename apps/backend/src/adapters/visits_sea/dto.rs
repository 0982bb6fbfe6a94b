//! DTOs for the visits_sea adapter.

/// DTO for appending a visit row. Dart columns are the raw storage form
/// (segment, multiplier factor); the repos layer converts from domain darts.
#[derive(Debug, Clone)]
pub struct VisitCreate {
    pub leg_id: i64,
    pub player_id: i64,
    pub visit_number: i16,
    pub dart1: (i16, i16),
    pub dart2: Option<(i16, i16)>,
    pub dart3: Option<(i16, i16)>,
    pub total_scored: i16,
    pub remaining_before: i16,
    pub remaining_after: i16,
    pub is_bust: bool,
    pub is_checkout: bool,
    pub idempotency_key: Option<String>,
}
