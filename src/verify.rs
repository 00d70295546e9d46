//! Verification system for finished house layouts.
//!
//! Checks a generated layout against the guarantees the pipeline makes:
//!
//! - **Room Overlap**: no two room rectangles share a cell
//! - **Room Tagging**: every `Room(i)` cell lies inside `rooms[i]` and every
//!   cell of `rooms[i]` is tagged `Room(i)`
//! - **Enclosure**: every room cell's orthogonal neighbours are the same room,
//!   a wall (or promoted spawner), an opening, or off-grid
//! - **Opening Cardinality**: each adjacent pair with a valid run got exactly
//!   one opening, pairs without one got none
//! - **Spawner Placement**: spawner count within the cap, all on the outer ring

use std::collections::BTreeMap;
use std::fmt;

use crate::house::generation::openings::adjacency;
use crate::house::types::Tile;
use crate::house::Layout;

/// How bad a failed check is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// The layout's own records disagree with its grid
    Warning,
    /// A geometric guarantee is broken
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VerifyCategory {
    RoomOverlap,
    RoomTagging,
    Enclosure,
    OpeningCardinality,
    SpawnerPlacement,
}

impl VerifyCategory {
    pub fn all() -> &'static [VerifyCategory] {
        &[
            VerifyCategory::RoomOverlap,
            VerifyCategory::RoomTagging,
            VerifyCategory::Enclosure,
            VerifyCategory::OpeningCardinality,
            VerifyCategory::SpawnerPlacement,
        ]
    }
}

impl fmt::Display for VerifyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyCategory::RoomOverlap => write!(f, "Room Overlap"),
            VerifyCategory::RoomTagging => write!(f, "Room Tagging"),
            VerifyCategory::Enclosure => write!(f, "Enclosure"),
            VerifyCategory::OpeningCardinality => write!(f, "Opening Cardinality"),
            VerifyCategory::SpawnerPlacement => write!(f, "Spawner Placement"),
        }
    }
}

/// One failed check
#[derive(Clone, Debug)]
pub struct Issue {
    pub category: VerifyCategory,
    pub severity: Severity,
    pub message: String,
    /// Grid cell the issue points at, if any
    pub location: Option<(usize, usize)>,
}

impl Issue {
    fn error(category: VerifyCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            severity: Severity::Error,
            message: message.into(),
            location: None,
        }
    }

    fn warning(category: VerifyCategory, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(category, message)
        }
    }

    fn at(mut self, x: usize, y: usize) -> Self {
        self.location = Some((x, y));
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationStatus {
    Passed,
    /// Only warnings
    Warnings,
    Failed,
}

/// Checks run and failed for one category
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub checks: usize,
    pub failed: usize,
}

#[derive(Clone, Debug)]
pub struct VerificationReport {
    pub map_size: (usize, usize),
    pub rooms_verified: usize,
    pub tallies: BTreeMap<VerifyCategory, Tally>,
    pub issues: Vec<Issue>,
}

impl VerificationReport {
    pub fn new(map_size: (usize, usize)) -> Self {
        Self {
            map_size,
            rooms_verified: 0,
            tallies: VerifyCategory::all().iter().map(|c| (*c, Tally::default())).collect(),
            issues: Vec::new(),
        }
    }

    fn pass(&mut self, category: VerifyCategory) {
        self.tallies.entry(category).or_default().checks += 1;
    }

    fn fail(&mut self, issue: Issue) {
        let tally = self.tallies.entry(issue.category).or_default();
        tally.checks += 1;
        tally.failed += 1;
        self.issues.push(issue);
    }

    pub fn status(&self) -> VerificationStatus {
        if self.issues.iter().any(|i| i.severity == Severity::Error) {
            VerificationStatus::Failed
        } else if self.issues.is_empty() {
            VerificationStatus::Passed
        } else {
            VerificationStatus::Warnings
        }
    }

    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues_in(&self, category: VerifyCategory) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.category == category).collect()
    }

    pub fn format(&self) -> String {
        let mut out = format!(
            "=== VERIFICATION ({}x{}, {} rooms) ===\n",
            self.map_size.0, self.map_size.1, self.rooms_verified
        );

        for (category, tally) in &self.tallies {
            let mark = if tally.failed == 0 { "ok  " } else { "FAIL" };
            out.push_str(&format!(
                "  {} {:<20} {}/{}\n",
                mark,
                category.to_string(),
                tally.checks - tally.failed,
                tally.checks
            ));
        }

        for issue in &self.issues {
            out.push_str(&format!("  [{}] {}", issue.severity, issue.message));
            if let Some((x, y)) = issue.location {
                out.push_str(&format!(" at ({}, {})", x, y));
            }
            out.push('\n');
        }

        let status = match self.status() {
            VerificationStatus::Passed => "PASSED",
            VerificationStatus::Warnings => "PASSED WITH WARNINGS",
            VerificationStatus::Failed => "FAILED",
        };
        out.push_str(&format!("STATUS: {}\n", status));
        out
    }
}

/// Run every check against a finished layout.
pub fn verify_layout(layout: &Layout, max_spawners: usize) -> VerificationReport {
    let mut report = VerificationReport::new((layout.width(), layout.height()));
    report.rooms_verified = layout.rooms.len();

    check_overlap(layout, &mut report);
    check_tagging(layout, &mut report);
    check_enclosure(layout, &mut report);
    check_openings(layout, &mut report);
    check_spawners(layout, max_spawners, &mut report);

    report
}

fn check_overlap(layout: &Layout, report: &mut VerificationReport) {
    for (i, a) in layout.rooms.iter().enumerate() {
        for (j, b) in layout.rooms.iter().enumerate().skip(i + 1) {
            if a.overlaps(b) {
                report.fail(
                    Issue::error(VerifyCategory::RoomOverlap, format!("Rooms {} and {} overlap", i, j))
                        .at(a.x.max(b.x), a.y.max(b.y)),
                );
            } else {
                report.pass(VerifyCategory::RoomOverlap);
            }
        }
    }
}

fn check_tagging(layout: &Layout, report: &mut VerificationReport) {
    for (x, y, tile) in layout.grid.iter() {
        if let Tile::Room(id) = tile {
            let inside = layout.rooms.get(*id).is_some_and(|r| r.contains(x, y));
            if !inside {
                report.fail(
                    Issue::error(
                        VerifyCategory::RoomTagging,
                        format!("Cell tagged room {} lies outside that room", id),
                    )
                    .at(x, y),
                );
            }
        }
    }

    for (id, room) in layout.rooms.iter().enumerate() {
        match room.cells().find(|&(x, y)| *layout.grid.get(x, y) != Tile::Room(id)) {
            Some((x, y)) => report.fail(
                Issue::error(
                    VerifyCategory::RoomTagging,
                    format!("Room {} has a cell not tagged as its floor", id),
                )
                .at(x, y),
            ),
            None => report.pass(VerifyCategory::RoomTagging),
        }
    }
}

fn check_enclosure(layout: &Layout, report: &mut VerificationReport) {
    let grid = &layout.grid;
    for (id, room) in layout.rooms.iter().enumerate() {
        let leak = room.cells().find_map(|(x, y)| {
            grid.neighbors(x, y).into_iter().find_map(|(nx, ny)| {
                let n = *grid.get(nx, ny);
                let closed = n == Tile::Room(id) || n.is_barrier() || matches!(n, Tile::Gap | Tile::Door);
                (!closed).then_some((nx, ny, n))
            })
        });

        match leak {
            Some((x, y, tile)) => report.fail(
                Issue::error(
                    VerifyCategory::Enclosure,
                    format!("Room {} borders {} directly", id, tile.display_name()),
                )
                .at(x, y),
            ),
            None => report.pass(VerifyCategory::Enclosure),
        }
    }
}

fn check_openings(layout: &Layout, report: &mut VerificationReport) {
    let opening_tile = layout.opening_style.tile();

    // Every adjacent pair must be accounted for by the carver
    for (i, a) in layout.rooms.iter().enumerate() {
        for (j, b) in layout.rooms.iter().enumerate().skip(i + 1) {
            let (vertical, horizontal) = adjacency(a, b);
            if (vertical || horizontal) && !a.overlaps(b) && layout.carve_report.connection(i, j).is_none() {
                report.fail(Issue::error(
                    VerifyCategory::OpeningCardinality,
                    format!("Adjacent rooms {} and {} were never considered", i, j),
                ));
            }
        }
    }

    for conn in &layout.carve_report.connections {
        match (&conn.opening, conn.candidates) {
            (None, 0) => report.pass(VerifyCategory::OpeningCardinality),
            (None, n) => report.fail(Issue::error(
                VerifyCategory::OpeningCardinality,
                format!("Rooms {} and {} had {} runs but no opening", conn.a, conn.b, n),
            )),
            (Some(_), 0) => report.fail(Issue::error(
                VerifyCategory::OpeningCardinality,
                format!("Rooms {} and {} opened without a candidate", conn.a, conn.b),
            )),
            (Some(opening), _) => {
                let intact = opening
                    .cells()
                    .into_iter()
                    .find(|&(x, y)| *layout.grid.get(x, y) != opening_tile);
                match intact {
                    Some((x, y)) => report.fail(
                        Issue::error(
                            VerifyCategory::OpeningCardinality,
                            format!("Opening between rooms {} and {} is not carved", conn.a, conn.b),
                        )
                        .at(x, y),
                    ),
                    None => report.pass(VerifyCategory::OpeningCardinality),
                }
            }
        }
    }

    let expected: usize = layout.carve_report.openings().map(|o| o.length).sum();
    let actual = layout.grid.count_where(|t| *t == opening_tile);
    if expected != actual {
        report.fail(Issue::warning(
            VerifyCategory::OpeningCardinality,
            format!("{} opening cells on the grid, {} recorded", actual, expected),
        ));
    }
}

fn check_spawners(layout: &Layout, max_spawners: usize, report: &mut VerificationReport) {
    let on_grid = layout.grid.count_where(|t| *t == Tile::Spawner);
    if on_grid > max_spawners {
        report.fail(Issue::error(
            VerifyCategory::SpawnerPlacement,
            format!("{} spawners exceed the cap of {}", on_grid, max_spawners),
        ));
    } else {
        report.pass(VerifyCategory::SpawnerPlacement);
    }

    for (x, y, tile) in layout.grid.iter() {
        if *tile == Tile::Spawner && !layout.grid.on_outer_ring(x, y) {
            report.fail(Issue::error(VerifyCategory::SpawnerPlacement, "Spawner off the outer ring").at(x, y));
        }
    }

    if on_grid != layout.spawners.len() {
        report.fail(Issue::warning(
            VerifyCategory::SpawnerPlacement,
            format!("{} spawners on the grid, {} recorded", on_grid, layout.spawners.len()),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::house::generate_layout_from_seed;

    #[test]
    fn test_generated_layouts_pass() {
        let config = LayoutConfig::default();
        for seed in 0..25 {
            let layout = generate_layout_from_seed(&config, seed).unwrap();
            let report = verify_layout(&layout, config.max_spawners);
            assert!(report.passed(), "seed {}:\n{}", seed, report.format());
        }
    }

    #[test]
    fn test_detects_inner_spawner_and_leak() {
        let config = LayoutConfig::default();
        let mut layout = generate_layout_from_seed(&config, 3).unwrap();

        // Knock a hole from a room straight into empty space
        let room = layout.rooms[0];
        let (wx, wy) = (room.x_max(), room.y);
        layout.grid.set(wx, wy, Tile::Empty);
        // And a spawner in the middle of a room
        let (cx, cy) = room.center();
        layout.grid.set(cx, cy, Tile::Spawner);

        let report = verify_layout(&layout, config.max_spawners);
        assert_eq!(report.status(), VerificationStatus::Failed);
        assert!(!report.issues_in(VerifyCategory::Enclosure).is_empty());
        assert!(!report.issues_in(VerifyCategory::SpawnerPlacement).is_empty());
        assert!(!report.issues_in(VerifyCategory::RoomTagging).is_empty());
    }

    #[test]
    fn test_bookkeeping_mismatch_is_only_a_warning() {
        let config = LayoutConfig::default();
        let mut layout = generate_layout_from_seed(&config, 4).unwrap();
        layout.spawners.push((0, 0));

        let report = verify_layout(&layout, config.max_spawners);
        assert_eq!(report.status(), VerificationStatus::Warnings);
        assert!(!report.passed());
        assert_eq!(report.tallies[&VerifyCategory::SpawnerPlacement].failed, 1);
    }

    #[test]
    fn test_format_mentions_status() {
        let layout = generate_layout_from_seed(&LayoutConfig::default(), 0).unwrap();
        let text = verify_layout(&layout, 4).format();
        assert!(text.contains("STATUS: PASSED"));
        assert!(text.contains("Enclosure"));
    }
}
