//! Tournament generation: roster → partnerships → courts → matches.

use tracing::{info, instrument};

use crate::config::tournament::TournamentConfig;
use crate::domain::{
    build_schedule, court_drafts, generate_partnerships, Court, Match, Partnership, Player,
    RoundPacking, Schedule, TournamentId,
};
use crate::errors::domain::DomainError;
use crate::repos::{MatchRepo, TournamentRepo};

/// Everything persisted by one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSchedule {
    pub partnerships: Vec<Partnership>,
    pub courts: Vec<Court>,
    pub schedule: Schedule,
    pub matches: Vec<Match>,
}

impl GeneratedSchedule {
    pub fn round_count(&self) -> u32 {
        self.schedule.round_count()
    }
}

pub struct ScheduleService<'a, T: ?Sized, M: ?Sized> {
    tournaments: &'a T,
    matches: &'a M,
    packing: RoundPacking,
}

impl<'a, T, M> ScheduleService<'a, T, M>
where
    T: TournamentRepo + ?Sized,
    M: MatchRepo + ?Sized,
{
    pub fn new(tournaments: &'a T, matches: &'a M) -> Self {
        Self {
            tournaments,
            matches,
            packing: RoundPacking::default(),
        }
    }

    pub fn with_packing(mut self, packing: RoundPacking) -> Self {
        self.packing = packing;
        self
    }

    /// Generate and persist a full round robin for `roster`.
    ///
    /// Configuration and roster size are checked before anything is
    /// written. The schedule is computed in full before the match insert,
    /// which stores all matches or none. For a single all-or-nothing unit
    /// covering partnerships and courts too, run this on a store bound to a
    /// transaction.
    #[instrument(
        skip(self, roster, config),
        fields(roster_size = roster.len(), num_courts = config.num_courts)
    )]
    pub async fn generate(
        &self,
        tournament_id: TournamentId,
        roster: &[Player],
        config: &TournamentConfig,
    ) -> Result<GeneratedSchedule, DomainError> {
        config.validate()?;
        let drafts = generate_partnerships(roster)?;

        let partnerships = self
            .tournaments
            .create_partnerships(tournament_id, &drafts)
            .await?;
        let courts = self.ensure_courts(tournament_id, config.num_courts).await?;

        let schedule = build_schedule(&partnerships, &courts, self.packing)?;
        let matches = self
            .matches
            .insert_matches(tournament_id, &schedule.matches)
            .await?;

        info!(
            partnerships = partnerships.len(),
            matches = matches.len(),
            rounds = schedule.round_count(),
            packing = ?self.packing,
            "tournament schedule generated"
        );

        Ok(GeneratedSchedule {
            partnerships,
            courts,
            schedule,
            matches,
        })
    }

    /// Courts numbered `1..=num_courts`, reusing existing rows and creating
    /// only the missing numbers.
    async fn ensure_courts(
        &self,
        tournament_id: TournamentId,
        num_courts: u32,
    ) -> Result<Vec<Court>, DomainError> {
        let existing = self.tournaments.list_courts(tournament_id).await?;
        let missing: Vec<_> = court_drafts(num_courts)?
            .into_iter()
            .filter(|draft| !existing.iter().any(|c| c.number == draft.number))
            .collect();

        let mut courts: Vec<Court> = existing
            .into_iter()
            .filter(|c| c.number <= num_courts)
            .collect();
        if !missing.is_empty() {
            let created = self.tournaments.create_courts(tournament_id, &missing).await?;
            courts.extend(created);
        }
        courts.sort_by_key(|c| c.number);
        Ok(courts)
    }
}
