// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Endomondo sport codes.

/// Sport code table, ordered by code.
pub const SPORTS: &[(i64, &str)] = &[
    (0, "Running"),
    (1, "Cycling, transport"),
    (2, "Cycling, sport"),
    (3, "Mountain biking"),
    (4, "Skating"),
    (5, "Roller skiing"),
    (6, "Skiing, cross country"),
    (7, "Skiing, downhill"),
    (8, "Snowboarding"),
    (9, "Kayaking"),
    (10, "Kite surfing"),
    (11, "Rowing"),
    (12, "Sailing"),
    (13, "Windsurfing"),
    (14, "Fitness walking"),
    (15, "Golfing"),
    (16, "Hiking"),
    (17, "Orienteering"),
    (18, "Walking"),
    (19, "Riding"),
    (20, "Swimming"),
    (21, "Indoor cycling"),
    (22, "Other"),
    (23, "Aerobics"),
    (24, "Badminton"),
    (25, "Baseball"),
    (26, "Basketball"),
    (27, "Boxing"),
    (28, "Climbing stairs"),
    (29, "Cricket"),
    (30, "Elliptical training"),
    (31, "Dancing"),
    (32, "Fencing"),
    (33, "Football, American"),
    (34, "Football, rugby"),
    (35, "Football, soccer"),
    (36, "Handball"),
    (37, "Hockey"),
    (38, "Pilates"),
    (39, "Polo"),
    (40, "Scuba diving"),
    (41, "Squash"),
    (42, "Table tennis"),
    (43, "Tennis"),
    (44, "Volleyball, beach"),
    (45, "Volleyball, indoor"),
    (46, "Weight training"),
    (47, "Yoga"),
    (48, "Martial arts"),
    (49, "Gymnastics"),
    (50, "Step counter"),
    (87, "Circuit Training"),
    (88, "Treadmill running"),
    (89, "Skateboarding"),
    (90, "Surfing"),
    (91, "Snowshoeing"),
    (92, "Wheelchair"),
    (93, "Climbing"),
    (94, "Treadmill walking"),
];

/// Human-readable name for a sport code.
pub fn sport_name(code: i64) -> Option<&'static str> {
    SPORTS
        .binary_search_by_key(&code, |(c, _)| *c)
        .ok()
        .map(|idx| SPORTS[idx].1)
}
