//! Checkout Advisor: canonical finishing routes for double-out play.
//!
//! This is a fixed lookup of the conventional routes players learn, not a
//! solver. 41..=170 carry the standard chart entries; 2..=40 are derived
//! (evens take the straight double, odds peel a single to leave a double,
//! preferring D16 territory). `None` means no three-dart finish exists:
//! remaining 1, the seven dead numbers below 170, and everything above it.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::dart::{Dart, Multiplier};

/// Scores ≤ 170 with no three-dart finish.
pub const NO_THREE_DART_FINISH: [i16; 7] = [159, 162, 163, 165, 166, 168, 169];

const fn s(n: u8) -> Dart {
    Dart {
        segment: n,
        multiplier: Multiplier::Single,
    }
}

const fn d(n: u8) -> Dart {
    Dart {
        segment: n,
        multiplier: Multiplier::Double,
    }
}

const fn t(n: u8) -> Dart {
    Dart {
        segment: n,
        multiplier: Multiplier::Treble,
    }
}

/// Double bull, the 50 finish.
const DB: Dart = d(25);

#[rustfmt::skip]
fn chart_41_to_170() -> Vec<(i16, Vec<Dart>)> {
    vec![
        (170, vec![t(20), t(20), DB]),
        (167, vec![t(20), t(19), DB]),
        (164, vec![t(20), t(18), DB]),
        (161, vec![t(20), t(17), DB]),
        (160, vec![t(20), t(20), d(20)]),
        (158, vec![t(20), t(20), d(19)]),
        (157, vec![t(20), t(19), d(20)]),
        (156, vec![t(20), t(20), d(18)]),
        (155, vec![t(20), t(19), d(19)]),
        (154, vec![t(20), t(18), d(20)]),
        (153, vec![t(20), t(19), d(18)]),
        (152, vec![t(20), t(20), d(16)]),
        (151, vec![t(20), t(17), d(20)]),
        (150, vec![t(20), t(18), d(18)]),
        (149, vec![t(20), t(19), d(16)]),
        (148, vec![t(20), t(16), d(20)]),
        (147, vec![t(20), t(17), d(18)]),
        (146, vec![t(20), t(18), d(16)]),
        (145, vec![t(20), t(15), d(20)]),
        (144, vec![t(20), t(20), d(12)]),
        (143, vec![t(20), t(17), d(16)]),
        (142, vec![t(20), t(14), d(20)]),
        (141, vec![t(20), t(19), d(12)]),
        (140, vec![t(20), t(20), d(10)]),
        (139, vec![t(20), t(13), d(20)]),
        (138, vec![t(20), t(18), d(12)]),
        (137, vec![t(20), t(19), d(10)]),
        (136, vec![t(20), t(20), d(8)]),
        (135, vec![t(20), t(17), d(12)]),
        (134, vec![t(20), t(14), d(16)]),
        (133, vec![t(20), t(19), d(8)]),
        (132, vec![t(20), t(16), d(12)]),
        (131, vec![t(20), t(13), d(16)]),
        (130, vec![t(20), t(18), d(8)]),
        (129, vec![t(19), t(16), d(12)]),
        (128, vec![t(20), t(20), d(4)]),
        (127, vec![t(20), t(17), d(8)]),
        (126, vec![t(19), t(19), d(6)]),
        (125, vec![t(20), t(19), d(4)]),
        (124, vec![t(20), t(16), d(8)]),
        (123, vec![t(19), t(16), d(9)]),
        (122, vec![t(18), t(18), d(7)]),
        (121, vec![t(20), t(11), d(14)]),
        (120, vec![t(20), s(20), d(20)]),
        (119, vec![t(19), t(10), d(16)]),
        (118, vec![t(20), s(18), d(20)]),
        (117, vec![t(20), s(17), d(20)]),
        (116, vec![t(20), s(16), d(20)]),
        (115, vec![t(20), s(15), d(20)]),
        (114, vec![t(20), s(14), d(20)]),
        (113, vec![t(20), s(13), d(20)]),
        (112, vec![t(20), s(12), d(20)]),
        (111, vec![t(20), s(11), d(20)]),
        (110, vec![t(20), s(10), d(20)]),
        (109, vec![t(20), s(9), d(20)]),
        (108, vec![t(20), s(8), d(20)]),
        (107, vec![t(19), s(10), d(20)]),
        (106, vec![t(20), s(6), d(20)]),
        (105, vec![t(20), s(5), d(20)]),
        (104, vec![t(18), s(10), d(20)]),
        (103, vec![t(19), s(6), d(20)]),
        (102, vec![t(20), s(10), d(16)]),
        (101, vec![t(17), s(10), d(20)]),
        (100, vec![t(20), d(20)]),
        (99, vec![t(19), s(10), d(16)]),
        (98, vec![t(20), d(19)]),
        (97, vec![t(19), d(20)]),
        (96, vec![t(20), d(18)]),
        (95, vec![t(19), d(19)]),
        (94, vec![t(18), d(20)]),
        (93, vec![t(19), d(18)]),
        (92, vec![t(20), d(16)]),
        (91, vec![t(17), d(20)]),
        (90, vec![t(20), d(15)]),
        (89, vec![t(19), d(16)]),
        (88, vec![t(20), d(14)]),
        (87, vec![t(17), d(18)]),
        (86, vec![t(18), d(16)]),
        (85, vec![t(15), d(20)]),
        (84, vec![t(20), d(12)]),
        (83, vec![t(17), d(16)]),
        (82, vec![t(14), d(20)]),
        (81, vec![t(19), d(12)]),
        (80, vec![t(20), d(10)]),
        (79, vec![t(13), d(20)]),
        (78, vec![t(18), d(12)]),
        (77, vec![t(19), d(10)]),
        (76, vec![t(20), d(8)]),
        (75, vec![t(17), d(12)]),
        (74, vec![t(14), d(16)]),
        (73, vec![t(19), d(8)]),
        (72, vec![t(16), d(12)]),
        (71, vec![t(13), d(16)]),
        (70, vec![t(18), d(8)]),
        (69, vec![t(19), d(6)]),
        (68, vec![t(20), d(4)]),
        (67, vec![t(17), d(8)]),
        (66, vec![t(10), d(18)]),
        (65, vec![t(19), d(4)]),
        (64, vec![t(16), d(8)]),
        (63, vec![t(13), d(12)]),
        (62, vec![t(10), d(16)]),
        (61, vec![t(15), d(8)]),
        (60, vec![s(20), d(20)]),
        (59, vec![s(19), d(20)]),
        (58, vec![s(18), d(20)]),
        (57, vec![s(17), d(20)]),
        (56, vec![s(16), d(20)]),
        (55, vec![s(15), d(20)]),
        (54, vec![s(14), d(20)]),
        (53, vec![s(13), d(20)]),
        (52, vec![s(12), d(20)]),
        (51, vec![s(11), d(20)]),
        (50, vec![DB]),
        (49, vec![s(9), d(20)]),
        (48, vec![s(16), d(16)]),
        (47, vec![s(15), d(16)]),
        (46, vec![s(6), d(20)]),
        (45, vec![s(13), d(16)]),
        (44, vec![s(12), d(16)]),
        (43, vec![s(11), d(16)]),
        (42, vec![s(10), d(16)]),
        (41, vec![s(9), d(16)]),
    ]
}

static FINISHES: Lazy<HashMap<i16, Vec<Dart>>> = Lazy::new(|| {
    let mut table: HashMap<i16, Vec<Dart>> = chart_41_to_170().into_iter().collect();

    for n in 2..=40i16 {
        let route = if n % 2 == 0 {
            vec![d((n / 2) as u8)]
        } else if n >= 33 {
            vec![s((n - 32) as u8), d(16)]
        } else {
            vec![s(1), d(((n - 1) / 2) as u8)]
        };
        table.insert(n, route);
    }

    table
});

/// Suggested finishing combination for a remaining score, or `None` when no
/// three-dart finish exists. Pure and total.
pub fn suggest(remaining: i16) -> Option<&'static [Dart]> {
    FINISHES.get(&remaining).map(|route| route.as_slice())
}

/// Human-readable form of a combination, e.g. "T20 T20 DB".
pub fn format_combination(darts: &[Dart]) -> String {
    let parts: Vec<String> = darts.iter().map(|dart| dart.to_string()).collect();
    parts.join(" ")
}
