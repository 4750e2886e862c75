//! In-process store implementing every repository trait.
//!
//! All state sits behind one `parking_lot::Mutex`; each trait call takes
//! the lock once, so a CAS or a batch insert is atomic with respect to
//! every other call.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{
    check_drafts, Court, CourtDraft, CourtId, Match, MatchId, MatchStatus, NewPlayer,
    Partnership, PartnershipDraft, PartnershipId, Player, PlayerId, ScheduledMatch, ScoreChange,
    ScoreChangeRecord, ScoreUpdate, StatusUpdate, TournamentId,
};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::{AuditLog, AuditSink, MatchRepo, PlayerRepo, TournamentRepo};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    players: BTreeMap<PlayerId, Player>,
    partnerships: BTreeMap<PartnershipId, Partnership>,
    courts: BTreeMap<CourtId, Court>,
    matches: BTreeMap<MatchId, Match>,
    score_changes: Vec<ScoreChangeRecord>,
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of score history entries across all matches.
    pub fn score_change_count(&self) -> usize {
        self.state.lock().score_changes.len()
    }

    pub fn match_count(&self) -> usize {
        self.state.lock().matches.len()
    }

    pub fn partnership_count(&self) -> usize {
        self.state.lock().partnerships.len()
    }
}

fn apply_cas(stored: &mut Match, expected_version: i32) -> Result<(), DomainError> {
    if stored.version != expected_version {
        return Err(DomainError::optimistic_lock(expected_version, stored.version));
    }
    stored.version += 1;
    Ok(())
}

fn match_not_found(id: MatchId) -> DomainError {
    DomainError::not_found(NotFoundKind::Match, format!("Match {id} not found"))
}

#[async_trait]
impl PlayerRepo for InMemoryStore {
    async fn create_player(&self, player: NewPlayer) -> Result<Player, DomainError> {
        let player = player.normalized()?;
        let mut state = self.state.lock();
        if state.players.values().any(|p| p.email == player.email) {
            return Err(DomainError::conflict(
                ConflictKind::UniqueEmail,
                "Email already registered",
            ));
        }
        let id = state.allocate_id();
        let created = Player {
            id,
            display_name: player.display_name,
            email: player.email,
            is_owner: player.is_owner,
        };
        state.players.insert(id, created.clone());
        Ok(created)
    }

    async fn find_player(&self, id: PlayerId) -> Result<Option<Player>, DomainError> {
        Ok(self.state.lock().players.get(&id).cloned())
    }

    async fn find_players(&self, ids: &[PlayerId]) -> Result<Vec<Player>, DomainError> {
        let state = self.state.lock();
        Ok(state
            .players
            .values()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TournamentRepo for InMemoryStore {
    async fn create_partnerships(
        &self,
        tournament_id: TournamentId,
        drafts: &[PartnershipDraft],
    ) -> Result<Vec<Partnership>, DomainError> {
        check_drafts(drafts)?;
        let mut state = self.state.lock();
        for draft in drafts {
            let pair = draft.pair_key();
            let exists = state
                .partnerships
                .values()
                .any(|p| p.tournament_id == tournament_id && p.pair_key() == pair);
            if exists {
                return Err(DomainError::conflict(
                    ConflictKind::DuplicatePartnership,
                    "Partnership already exists for this tournament",
                ));
            }
        }
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = state.allocate_id();
            let partnership = Partnership {
                id,
                tournament_id,
                player1_id: draft.player1_id,
                player2_id: draft.player2_id,
                label: draft.label.clone(),
            };
            state.partnerships.insert(id, partnership.clone());
            created.push(partnership);
        }
        Ok(created)
    }

    async fn list_partnerships(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<Partnership>, DomainError> {
        let state = self.state.lock();
        Ok(state
            .partnerships
            .values()
            .filter(|p| p.tournament_id == tournament_id)
            .cloned()
            .collect())
    }

    async fn find_partnership(
        &self,
        id: PartnershipId,
    ) -> Result<Option<Partnership>, DomainError> {
        Ok(self.state.lock().partnerships.get(&id).cloned())
    }

    async fn create_courts(
        &self,
        tournament_id: TournamentId,
        drafts: &[CourtDraft],
    ) -> Result<Vec<Court>, DomainError> {
        let mut state = self.state.lock();
        let mut numbers: Vec<u32> = state
            .courts
            .values()
            .filter(|c| c.tournament_id == tournament_id)
            .map(|c| c.number)
            .collect();
        for draft in drafts {
            if numbers.contains(&draft.number) {
                return Err(DomainError::conflict(
                    ConflictKind::DuplicateCourt,
                    format!("Court {} already exists for this tournament", draft.number),
                ));
            }
            numbers.push(draft.number);
        }
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = state.allocate_id();
            let court = Court {
                id,
                tournament_id,
                number: draft.number,
                name: draft.name.clone(),
            };
            state.courts.insert(id, court.clone());
            created.push(court);
        }
        Ok(created)
    }

    async fn list_courts(&self, tournament_id: TournamentId) -> Result<Vec<Court>, DomainError> {
        let state = self.state.lock();
        let mut courts: Vec<Court> = state
            .courts
            .values()
            .filter(|c| c.tournament_id == tournament_id)
            .cloned()
            .collect();
        courts.sort_by_key(|c| c.number);
        Ok(courts)
    }
}

#[async_trait]
impl MatchRepo for InMemoryStore {
    async fn insert_matches(
        &self,
        tournament_id: TournamentId,
        scheduled: &[ScheduledMatch],
    ) -> Result<Vec<Match>, DomainError> {
        let mut state = self.state.lock();

        // Reject the whole batch before touching state.
        for m in scheduled {
            let known = state.partnerships.contains_key(&m.partnership1_id)
                && state.partnerships.contains_key(&m.partnership2_id)
                && state.courts.contains_key(&m.court_id);
            if !known {
                return Err(DomainError::validation(
                    ValidationKind::Other("ForeignKey".into()),
                    format!(
                        "scheduled match references unknown partnership or court ({} vs {} on {})",
                        m.partnership1_id, m.partnership2_id, m.court_id
                    ),
                ));
            }
        }

        let mut created = Vec::with_capacity(scheduled.len());
        for m in scheduled {
            let id = state.allocate_id();
            let row = Match {
                id,
                tournament_id,
                partnership1_id: m.partnership1_id,
                partnership2_id: m.partnership2_id,
                court_id: m.court_id,
                round_number: m.round_number,
                score: None,
                status: MatchStatus::Waiting,
                version: 0,
                recorded_by: None,
                recorded_at: None,
            };
            state.matches.insert(id, row.clone());
            created.push(row);
        }
        Ok(created)
    }

    async fn find_match(&self, id: MatchId) -> Result<Option<Match>, DomainError> {
        Ok(self.state.lock().matches.get(&id).cloned())
    }

    async fn list_matches(&self, tournament_id: TournamentId) -> Result<Vec<Match>, DomainError> {
        let state = self.state.lock();
        let mut matches: Vec<Match> = state
            .matches
            .values()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect();
        matches.sort_by_key(|m| (m.round_number, m.court_id));
        Ok(matches)
    }

    async fn cas_update_score(&self, update: ScoreUpdate) -> Result<Match, DomainError> {
        let mut state = self.state.lock();
        let stored = state
            .matches
            .get_mut(&update.match_id)
            .ok_or_else(|| match_not_found(update.match_id))?;
        apply_cas(stored, update.expected_version)?;
        stored.score = Some(update.score);
        stored.status = update.status;
        stored.recorded_by = Some(update.actor_id);
        stored.recorded_at = Some(update.recorded_at);
        Ok(stored.clone())
    }

    async fn cas_update_status(&self, update: StatusUpdate) -> Result<Match, DomainError> {
        let mut state = self.state.lock();
        let stored = state
            .matches
            .get_mut(&update.match_id)
            .ok_or_else(|| match_not_found(update.match_id))?;
        apply_cas(stored, update.expected_version)?;
        stored.status = update.status;
        Ok(stored.clone())
    }
}

#[async_trait]
impl AuditSink for InMemoryStore {
    async fn append(&self, change: &ScoreChange) -> Result<ScoreChangeRecord, DomainError> {
        let mut state = self.state.lock();
        let id = state.allocate_id();
        let record = ScoreChangeRecord {
            id,
            change: change.clone(),
        };
        state.score_changes.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl AuditLog for InMemoryStore {
    async fn history_for_match(
        &self,
        match_id: MatchId,
    ) -> Result<Vec<ScoreChangeRecord>, DomainError> {
        let state = self.state.lock();
        Ok(state
            .score_changes
            .iter()
            .filter(|r| r.change.match_id == match_id)
            .cloned()
            .collect())
    }
}
