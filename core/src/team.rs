//! Team configuration: who is seated, what each seat costs, and how
//! many hours the team can deliver per month.
//!
//! There is exactly one cost model: every seat costs its level×location
//! hourly rate times `HOURS_PER_PERSON_PER_MONTH`. Seats beyond the
//! makeup length repeat the makeup pattern from the start.

use crate::types::{Currency, Hours, HOURS_PER_PERSON_PER_MONTH};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StaffLevel {
    L1,
    L2,
    L3,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StaffLocation {
    Offshore,
    Onshore,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    pub level:    StaffLevel,
    pub location: StaffLocation,
}

impl TeamMember {
    pub fn new(level: StaffLevel, location: StaffLocation) -> Self {
        Self { level, location }
    }
}

impl Default for TeamMember {
    /// Profile given to seats added by `TeamConfiguration::resize`.
    fn default() -> Self {
        Self::new(StaffLevel::L1, StaffLocation::Offshore)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamConfiguration {
    pub team_size:        u32,
    pub team_makeup:      Vec<TeamMember>,
    pub l1_offshore_rate: Currency,
    pub l1_onshore_rate:  Currency,
    pub l2_offshore_rate: Currency,
    pub l2_onshore_rate:  Currency,
    pub l3_offshore_rate: Currency,
    pub l3_onshore_rate:  Currency,
    /// Target margin, percent.
    pub target_margin:    f64,
}

/// Which staff levels are present in a team makeup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCoverage {
    pub has_l1: bool,
    pub has_l2: bool,
    pub has_l3: bool,
}

impl LevelCoverage {
    /// A makeup is complete when every level is staffed at least once.
    pub fn is_valid(&self) -> bool {
        self.has_l1 && self.has_l2 && self.has_l3
    }
}

impl TeamConfiguration {
    /// Hourly rate for one member, straight from the rate table.
    pub fn rate_for(&self, member: &TeamMember) -> Currency {
        use StaffLevel::*;
        use StaffLocation::*;
        match (member.level, member.location) {
            (L1, Offshore) => self.l1_offshore_rate,
            (L1, Onshore)  => self.l1_onshore_rate,
            (L2, Offshore) => self.l2_offshore_rate,
            (L2, Onshore)  => self.l2_onshore_rate,
            (L3, Offshore) => self.l3_offshore_rate,
            (L3, Onshore)  => self.l3_onshore_rate,
        }
    }

    /// Fully-loaded monthly cost of `seats` seats.
    ///
    /// Seat `i` is occupied by `team_makeup[i % team_makeup.len()]`.
    /// An empty makeup has no rate to charge and costs nothing.
    pub fn monthly_cost_for_seats(&self, seats: u32) -> Currency {
        if self.team_makeup.is_empty() {
            return 0.0;
        }
        (0..seats as usize)
            .map(|i| {
                let member = &self.team_makeup[i % self.team_makeup.len()];
                self.rate_for(member) * HOURS_PER_PERSON_PER_MONTH
            })
            .sum()
    }

    /// Literal cost of the seated makeup, one entry per seat.
    pub fn makeup_monthly_cost(&self) -> Currency {
        self.monthly_cost_for_seats(self.team_makeup.len() as u32)
    }

    /// Hours available per month at the configured team size.
    pub fn monthly_capacity(&self) -> Hours {
        capacity_for(self.team_size)
    }

    /// Change the team size, keeping existing members in place and
    /// padding any new seats with the default member.
    pub fn resize(&mut self, new_size: u32) {
        self.team_makeup.resize(new_size as usize, TeamMember::default());
        self.team_size = new_size;
    }

    pub fn level_coverage(&self) -> LevelCoverage {
        let has = |level| self.team_makeup.iter().any(|m| m.level == level);
        LevelCoverage {
            has_l1: has(StaffLevel::L1),
            has_l2: has(StaffLevel::L2),
            has_l3: has(StaffLevel::L3),
        }
    }

    /// Six-person starter team with the reference rate card.
    pub fn default_team() -> Self {
        use StaffLevel::*;
        use StaffLocation::*;
        Self {
            team_size: 6,
            team_makeup: vec![
                TeamMember::new(L1, Offshore),
                TeamMember::new(L1, Offshore),
                TeamMember::new(L2, Offshore),
                TeamMember::new(L2, Onshore),
                TeamMember::new(L3, Offshore),
                TeamMember::new(L3, Onshore),
            ],
            l1_offshore_rate: 55.0,
            l1_onshore_rate:  143.0,
            l2_offshore_rate: 77.0,
            l2_onshore_rate:  196.0,
            l3_offshore_rate: 45.0,
            l3_onshore_rate:  131.0,
            target_margin:    15.0,
        }
    }
}

impl Default for TeamConfiguration {
    fn default() -> Self {
        Self::default_team()
    }
}

/// Monthly hours delivered by `team_size` people.
pub fn capacity_for(team_size: u32) -> Hours {
    team_size as f64 * HOURS_PER_PERSON_PER_MONTH
}

/// Smallest head count that covers `effort` hours in a month.
pub fn team_size_for_effort(effort: Hours) -> u32 {
    (effort / HOURS_PER_PERSON_PER_MONTH).ceil().max(0.0) as u32
}
