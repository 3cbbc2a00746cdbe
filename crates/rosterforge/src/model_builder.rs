//! Declares the mixed-integer model of one scheduling run.
//!
//! Variables:
//! - `choice[v][occ][s]` (binary): volunteer `v` works seat `occ` at slot `s`
//! - `assigned_any[v][occ]` (binary): `v` works `occ` at some slot
//! - `together[pair][role][s]` (binary, at-best mode only): both friends work
//!   some seat of `role` at `s`
//!
//! The objective rewards weighted coverage, charges every seat a volunteer
//! is spread over, and rewards friends working the same role together.

use std::collections::HashMap;

use rosterforge_config::{FriendMode, SchedulerConfig};
use rosterforge_core::{
    Interval, Result, Role, RoleId, RoleOccurrence, RosterError, VolunteerId,
};
use rosterforge_solver::{LinearConstraint, LinearExpr, MilpError, MilpModel, VarId};
use tracing::{debug, trace};

use crate::demand::DemandModel;
use crate::eligibility::{accepts_category, Eligibility, FriendPair};
use crate::problem::EventProblem;

/// A built model plus the variable layout needed to read a solution back.
#[derive(Debug, Clone)]
pub struct ScheduleModel {
    model: MilpModel,
    volunteers: Vec<VolunteerId>,
    occurrences: Vec<RoleOccurrence>,
    slots: Vec<Interval>,
    choice: Vec<VarId>,
    assigned_any: Vec<VarId>,
    together: Vec<VarId>,
    friend_mode: FriendMode,
}

impl ScheduleModel {
    /// Declares every variable, constraint and the objective.
    ///
    /// Fails only when a fixed placement names something outside the
    /// problem; impossible placements are left for the solver to reject.
    pub fn build(
        problem: &EventProblem,
        demand: &DemandModel,
        eligibility: &Eligibility,
        config: &SchedulerConfig,
    ) -> Result<Self> {
        problem.validate()?;
        let mut builder = ModelBuilder::new(problem, demand, eligibility, config);
        builder.declare().map_err(solver_error)?;
        Ok(builder.finish())
    }

    pub fn model(&self) -> &MilpModel {
        &self.model
    }

    pub fn friend_mode(&self) -> FriendMode {
        self.friend_mode
    }

    pub fn volunteers(&self) -> &[VolunteerId] {
        &self.volunteers
    }

    pub fn occurrences(&self) -> &[RoleOccurrence] {
        &self.occurrences
    }

    pub fn slots(&self) -> &[Interval] {
        &self.slots
    }

    /// The `choice` variable of volunteer index `v`, seat index `o`, slot `s`.
    #[inline]
    pub fn choice(&self, v: usize, o: usize, s: usize) -> VarId {
        self.choice[(v * self.occurrences.len() + o) * self.slots.len() + s]
    }

    #[inline]
    pub fn assigned_any(&self, v: usize, o: usize) -> VarId {
        self.assigned_any[v * self.occurrences.len() + o]
    }

    /// Number of friend togetherness indicators declared.
    pub fn together_count(&self) -> usize {
        self.together.len()
    }
}

fn solver_error(err: MilpError) -> RosterError {
    RosterError::Solver(err.to_string())
}

struct ModelBuilder<'a> {
    problem: &'a EventProblem,
    demand: &'a DemandModel,
    eligibility: &'a Eligibility,
    config: &'a SchedulerConfig,
    roles: HashMap<RoleId, usize>,
    volunteer_index: HashMap<VolunteerId, usize>,
    model: MilpModel,
    choice: Vec<VarId>,
    assigned_any: Vec<VarId>,
    together: Vec<(VarId, f64)>,
    objective: LinearExpr,
}

impl<'a> ModelBuilder<'a> {
    fn new(
        problem: &'a EventProblem,
        demand: &'a DemandModel,
        eligibility: &'a Eligibility,
        config: &'a SchedulerConfig,
    ) -> Self {
        let roles = problem
            .roles
            .iter()
            .enumerate()
            .map(|(index, role)| (role.id, index))
            .collect();
        let volunteer_index = problem
            .volunteers
            .iter()
            .enumerate()
            .map(|(index, volunteer)| (volunteer.id, index))
            .collect();
        Self {
            problem,
            demand,
            eligibility,
            config,
            roles,
            volunteer_index,
            model: MilpModel::new("event"),
            choice: Vec::new(),
            assigned_any: Vec::new(),
            together: Vec::new(),
            objective: LinearExpr::new(),
        }
    }

    fn volunteer_count(&self) -> usize {
        self.problem.volunteers.len()
    }

    fn occurrence_count(&self) -> usize {
        self.demand.occurrences().len()
    }

    fn slot_count(&self) -> usize {
        self.problem.window.len()
    }

    fn choice(&self, v: usize, o: usize, s: usize) -> VarId {
        self.choice[(v * self.occurrence_count() + o) * self.slot_count() + s]
    }

    fn role_of(&self, occurrence: &RoleOccurrence) -> Option<&'a Role> {
        self.roles
            .get(&occurrence.role)
            .map(|&index| &self.problem.roles[index])
    }

    fn seat(&self, role: RoleId, position: usize) -> Option<usize> {
        self.demand
            .occurrence_index(&RoleOccurrence::new(role, position))
    }

    fn declare(&mut self) -> std::result::Result<(), MilpError> {
        self.declare_variables();
        self.add_coverage()?;
        self.add_exclusivity()?;
        self.add_usage_indicators()?;
        match self.config.friend_mode {
            FriendMode::Strict => self.add_strict_friends()?,
            FriendMode::AtBest => self.add_friend_togetherness()?,
            FriendMode::None => {}
        }
        self.add_availability()?;
        self.add_categories()?;
        self.add_fixed_placements()?;
        self.set_objective()
    }

    fn declare_variables(&mut self) {
        let (volunteers, occurrences, slots) =
            (self.volunteer_count(), self.occurrence_count(), self.slot_count());
        self.choice.reserve(volunteers * occurrences * slots);
        self.assigned_any.reserve(volunteers * occurrences);

        for v in 0..volunteers {
            for occurrence in self.demand.occurrences() {
                for s in 0..slots {
                    let var = self.model.add_binary(format!("choice[{v}][{occurrence}][{s}]"));
                    self.choice.push(var);
                }
            }
        }
        for v in 0..volunteers {
            for occurrence in self.demand.occurrences() {
                let var = self
                    .model
                    .add_binary(format!("assigned_any[{v}][{occurrence}]"));
                self.assigned_any.push(var);
            }
        }
    }

    /// At most one volunteer per demanded (seat, slot); none elsewhere.
    fn add_coverage(&mut self) -> std::result::Result<(), MilpError> {
        for (o, occurrence) in self.demand.occurrences().iter().enumerate() {
            for s in 0..self.slot_count() {
                let staff = LinearExpr::sum((0..self.volunteer_count()).map(|v| self.choice(v, o, s)));
                if self.demand.is_demanded(occurrence.role, s) {
                    self.model.add_constraint(LinearConstraint::le(staff, 1.0))?;
                } else {
                    self.model.add_constraint(LinearConstraint::equals(staff, 0.0))?;
                }
            }
        }
        Ok(())
    }

    /// One seat per volunteer per slot.
    fn add_exclusivity(&mut self) -> std::result::Result<(), MilpError> {
        for v in 0..self.volunteer_count() {
            for s in 0..self.slot_count() {
                let posts = LinearExpr::sum((0..self.occurrence_count()).map(|o| self.choice(v, o, s)));
                self.model.add_constraint(LinearConstraint::le(posts, 1.0))?;
            }
        }
        Ok(())
    }

    /// `sum / (S + 1) <= assigned_any <= sum` over the slots of one seat.
    fn add_usage_indicators(&mut self) -> std::result::Result<(), MilpError> {
        let slots = self.slot_count();
        let scale = 1.0 / (slots as f64 + 1.0);
        for v in 0..self.volunteer_count() {
            for o in 0..self.occurrence_count() {
                let used = self.assigned_any[v * self.occurrence_count() + o];
                let worked = LinearExpr::sum((0..slots).map(|s| self.choice(v, o, s)));
                self.model.add_constraint(LinearConstraint::ge(
                    LinearExpr::from(used) - worked.clone().scaled(scale),
                    0.0,
                ))?;
                self.model
                    .add_constraint(LinearConstraint::le(LinearExpr::from(used) - worked, 0.0))?;
                // Same integer points, tighter relaxation.
                for s in 0..slots {
                    self.model.add_constraint(LinearConstraint::ge(
                        LinearExpr::from(used) - LinearExpr::from(self.choice(v, o, s)),
                        0.0,
                    ))?;
                }
            }
        }
        Ok(())
    }

    fn pair_indices(&self, pair: &FriendPair) -> Option<(usize, usize)> {
        Some((
            *self.volunteer_index.get(&pair.first)?,
            *self.volunteer_index.get(&pair.second)?,
        ))
    }

    /// Friends share seats 0 and 1 of a role at every common slot, or are
    /// both absent; single-seat roles are closed to them there.
    fn add_strict_friends(&mut self) -> std::result::Result<(), MilpError> {
        for pair in self.eligibility.friend_pairs() {
            let Some((a, b)) = self.pair_indices(pair) else {
                continue;
            };
            for role in &self.problem.roles {
                let (Some(first_seat), second_seat) = (self.seat(role.id, 0), self.seat(role.id, 1))
                else {
                    continue;
                };
                for &s in &pair.common_slots {
                    match second_seat {
                        Some(second_seat) if role.occurrence >= 2 => {
                            let linked = LinearExpr::from(self.choice(a, first_seat, s))
                                - LinearExpr::from(self.choice(b, second_seat, s));
                            self.model
                                .add_constraint(LinearConstraint::equals(linked, 0.0))?;
                        }
                        _ => {
                            for member in [a, b] {
                                self.model.add_constraint(LinearConstraint::equals(
                                    self.choice(member, first_seat, s),
                                    0.0,
                                ))?;
                            }
                        }
                    }
                }
            }
            debug!(
                event = "friend_constraints",
                mode = "strict",
                first = %pair.first,
                second = %pair.second,
            );
        }
        Ok(())
    }

    /// `together <= n / 2` and `together >= n / 2 - 1 / 2`, where `n` counts
    /// both friends over every seat of the role at the slot.
    ///
    /// Indicators exist only for roles of two seats or more, at slots that
    /// are both common to the pair and demanded by the role.
    fn add_friend_togetherness(&mut self) -> std::result::Result<(), MilpError> {
        let reward = self.config.objective.friend_reward;
        for (p, pair) in self.eligibility.friend_pairs().iter().enumerate() {
            let Some((a, b)) = self.pair_indices(pair) else {
                continue;
            };
            for role in &self.problem.roles {
                if role.occurrence < 2 {
                    continue;
                }
                let seats: Vec<usize> = (0..role.occurrence)
                    .filter_map(|position| self.seat(role.id, position))
                    .collect();
                for &s in &pair.common_slots {
                    if !self.demand.is_demanded(role.id, s) {
                        continue;
                    }
                    let together = self
                        .model
                        .add_binary(format!("together[{p}][{}][{s}]", role.id));
                    let mut half = LinearExpr::new();
                    for member in [a, b] {
                        for &o in &seats {
                            half.add_term(self.choice(member, o, s), 0.5);
                        }
                    }
                    self.model.add_constraint(LinearConstraint::le(
                        LinearExpr::from(together) - half.clone(),
                        0.0,
                    ))?;
                    self.model.add_constraint(LinearConstraint::ge(
                        LinearExpr::from(together) - half,
                        -0.5,
                    ))?;
                    self.together.push((together, reward));
                }
            }
            debug!(
                event = "friend_constraints",
                mode = "at_best",
                first = %pair.first,
                second = %pair.second,
            );
        }
        Ok(())
    }

    fn add_availability(&mut self) -> std::result::Result<(), MilpError> {
        for (v, volunteer) in self.problem.volunteers.iter().enumerate() {
            for s in 0..self.slot_count() {
                if self.eligibility.is_available(v, s) {
                    continue;
                }
                trace!(event = "unavailable", volunteer = %volunteer.id, slot = s);
                for o in 0..self.occurrence_count() {
                    self.model
                        .add_constraint(LinearConstraint::equals(self.choice(v, o, s), 0.0))?;
                }
            }
        }
        Ok(())
    }

    fn add_categories(&mut self) -> std::result::Result<(), MilpError> {
        for (v, volunteer) in self.problem.volunteers.iter().enumerate() {
            if volunteer.categories.is_empty() {
                continue;
            }
            for (o, occurrence) in self.demand.occurrences().iter().enumerate() {
                let Some(role) = self.role_of(occurrence) else {
                    continue;
                };
                if accepts_category(volunteer, role) {
                    continue;
                }
                trace!(event = "category_excluded", volunteer = %volunteer.id, seat = %occurrence);
                for s in 0..self.slot_count() {
                    self.model
                        .add_constraint(LinearConstraint::equals(self.choice(v, o, s), 0.0))?;
                }
            }
        }
        Ok(())
    }

    fn add_fixed_placements(&mut self) -> std::result::Result<(), MilpError> {
        for placement in &self.problem.fixed_placements {
            let (Some(&v), Some(o), Some(s)) = (
                self.volunteer_index.get(&placement.volunteer),
                self.demand.occurrence_index(&placement.occurrence),
                self.problem.window.index_of(&placement.slot),
            ) else {
                continue;
            };
            debug!(
                event = "fixed_placement",
                volunteer = %placement.volunteer,
                seat = %placement.occurrence,
                slot = %placement.slot,
            );
            self.model
                .add_constraint(LinearConstraint::equals(self.choice(v, o, s), 1.0))?;
        }
        Ok(())
    }

    fn set_objective(&mut self) -> std::result::Result<(), MilpError> {
        for (o, occurrence) in self.demand.occurrences().iter().enumerate() {
            let weight = self.role_of(occurrence).map_or(0, |role| role.weight);
            if weight == 0 {
                continue;
            }
            for v in 0..self.volunteer_count() {
                for s in 0..self.slot_count() {
                    let var = self.choice(v, o, s);
                    self.objective.add_term(var, -f64::from(weight));
                }
            }
        }

        let spread = self.config.objective.spread_penalty;
        if spread != 0.0 {
            for &used in &self.assigned_any {
                self.objective.add_term(used, spread);
            }
        }

        for &(together, reward) in &self.together {
            if reward != 0.0 {
                self.objective.add_term(together, -reward);
            }
        }

        self.model.set_objective(std::mem::take(&mut self.objective))
    }

    fn finish(self) -> ScheduleModel {
        ScheduleModel {
            model: self.model,
            volunteers: self.problem.volunteers.iter().map(|v| v.id).collect(),
            occurrences: self.demand.occurrences().to_vec(),
            slots: self.problem.window.slots().to_vec(),
            choice: self.choice,
            assigned_any: self.assigned_any,
            together: self.together.into_iter().map(|(var, _)| var).collect(),
            friend_mode: self.config.friend_mode,
        }
    }
}

#[cfg(test)]
#[path = "model_builder_tests.rs"]
mod tests;
