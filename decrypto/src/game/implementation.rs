//! The game aggregate.
//!
//! [`Game`] owns the players and teams of one session and exposes the
//! player-facing operations. Each operation validates its preconditions,
//! mutates state, and then hands off to the [`PhaseManager`] so the phase
//! reflects the action before the caller sees the result.

use std::sync::Arc;

use super::{
    GameError, GameResult,
    entities::{
        Clues, Code, GameId, GameView, PerTeam, Player, PlayerId, Team, TeamName, sanitize_clues,
    },
    keywords::KeywordPool,
    round::{Round, RoundManager},
    state_machine::{Phase, PhaseManager},
};
use crate::bot::BOTS;

#[derive(Debug)]
pub struct Game {
    id: GameId,
    players: Vec<Player>,
    teams: PerTeam<Team>,
    phase_manager: PhaseManager,
    round_manager: RoundManager,
}

impl Game {
    /// Creates a game in the lobby. Fails if the word list can't deal both
    /// teams a full set of keywords.
    pub fn new(id: GameId, keywords: Arc<[String]>) -> GameResult<Self> {
        let keyword_pool = KeywordPool::new(keywords)?;
        Ok(Self {
            id,
            players: Vec::new(),
            teams: PerTeam::from_fn(Team::new),
            phase_manager: PhaseManager::new(keyword_pool),
            round_manager: RoundManager::new(),
        })
    }

    pub fn id(&self) -> &GameId {
        &self.id
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.player_id == player_id)
    }

    pub fn team(&self, name: TeamName) -> &Team {
        &self.teams[name]
    }

    pub fn teams(&self) -> &PerTeam<Team> {
        &self.teams
    }

    pub fn phase(&self) -> Phase {
        self.phase_manager.current_phase()
    }

    pub fn current_round(&self) -> &Round {
        self.round_manager.current_round()
    }

    pub fn round_number(&self) -> usize {
        self.current_round().number
    }

    /// Team the player currently belongs to, if any.
    pub fn team_of(&self, player_id: &PlayerId) -> Option<TeamName> {
        TeamName::ALL
            .into_iter()
            .find(|&name| self.teams[name].has_member(player_id))
    }

    #[must_use]
    pub fn view(&self) -> GameView {
        GameView {
            game_id: self.id.clone(),
            players: self.players.clone(),
            teams: vec![self.teams.white.clone(), self.teams.black.clone()],
            phase: self.phase(),
            round_number: self.round_number(),
            round: self.current_round().clone(),
        }
    }

    /// Adds the player, or renames them if they already joined.
    pub fn join_game(&mut self, player_id: PlayerId, player_name: &str) -> GameResult<()> {
        match self.players.iter_mut().find(|p| p.player_id == player_id) {
            Some(player) => player.rename(player_name),
            None => {
                log::debug!("Game {}: {} joined", self.id, player_id);
                self.players.push(Player::new(player_id, player_name));
            }
        }
        self.advance();
        Ok(())
    }

    /// Moves the player onto `team_name`, removing them from any other team.
    pub fn join_team(&mut self, player_id: &PlayerId, team_name: &str) -> GameResult<()> {
        self.require_player(player_id)?;
        let name: TeamName = team_name.parse()?;
        if self.teams[name].has_member(player_id) {
            return Err(GameError::AlreadyOnTeam(name));
        }

        for other in TeamName::ALL {
            self.teams[other].player_ids.retain(|id| id != player_id);
        }
        self.teams[name].player_ids.push(player_id.clone());

        self.advance();
        Ok(())
    }

    /// Seats any of the fixed bots that aren't already in the game.
    pub fn add_bots(&mut self) -> GameResult<()> {
        for bot in &BOTS {
            let bot_id = bot.player_id()?;
            if self.player(&bot_id).is_some() {
                continue;
            }
            self.players.push(bot.player()?);
            self.teams[bot.team].player_ids.push(bot_id);
        }
        self.advance();
        Ok(())
    }

    pub fn player_ready(&mut self, player_id: &PlayerId, ready: bool) -> GameResult<()> {
        self.require_team(player_id)?;
        if let Some(player) = self.players.iter_mut().find(|p| &p.player_id == player_id) {
            player.ready = ready;
        }
        self.advance();
        Ok(())
    }

    /// Records the encryptor's clues for the current round.
    pub fn submit_clues(&mut self, encryptor_id: &PlayerId, clues: Clues) -> GameResult<()> {
        let team = self.require_team(encryptor_id)?;
        if self.teams[team].current_encryptor_id.as_ref() != Some(encryptor_id) {
            return Err(GameError::NotEncryptor);
        }

        self.round_manager.current_round_mut().team_clues[team] = Some(sanitize_clues(clues));
        self.advance();
        Ok(())
    }

    /// Records `team_name`'s guess at the opposing team's code.
    pub fn submit_intercept_guess(&mut self, team_name: &str, guess: Code) -> GameResult<()> {
        let team: TeamName = team_name.parse()?;
        guess.validate()?;

        self.round_manager.current_round_mut().team_intercept_guesses[team] = Some(guess);
        self.advance();
        Ok(())
    }

    /// Records `team_name`'s guess at its own code.
    pub fn submit_decode_guess(&mut self, team_name: &str, guess: Code) -> GameResult<()> {
        let team: TeamName = team_name.parse()?;
        guess.validate()?;

        self.round_manager.current_round_mut().team_decode_guesses[team] = Some(guess);
        self.advance();
        Ok(())
    }

    pub fn submit_ready_for_next_round(&mut self, player_id: &PlayerId) -> GameResult<()> {
        let team = self.require_team(player_id)?;
        let ready = &mut self
            .round_manager
            .current_round_mut()
            .team_players_ready_for_next_round[team];
        if !ready.contains(player_id) {
            ready.push(player_id.clone());
        }
        self.advance();
        Ok(())
    }

    fn require_player(&self, player_id: &PlayerId) -> GameResult<&Player> {
        self.player(player_id).ok_or(GameError::PlayerDoesNotExist)
    }

    fn require_team(&self, player_id: &PlayerId) -> GameResult<TeamName> {
        self.require_player(player_id)?;
        self.team_of(player_id).ok_or(GameError::NotOnTeam)
    }

    fn advance(&mut self) {
        let Some(phase) = self.phase_manager.transition(
            &self.players,
            &mut self.teams,
            &mut self.round_manager,
        ) else {
            return;
        };

        log::info!(
            "Game {}: entered {} (round {})",
            self.id,
            phase,
            self.round_number()
        );
        match phase {
            Phase::MainReveal => self.ready_bots_for_next_round(),
            Phase::Over => log::info!(
                "Game {} over: White {}/{}, Black {}/{} (intercepts/miscommunications)",
                self.id,
                self.teams.white.intercepts,
                self.teams.white.miscommunications,
                self.teams.black.intercepts,
                self.teams.black.miscommunications,
            ),
            _ => {}
        }
    }

    fn ready_bots_for_next_round(&mut self) {
        let bots: Vec<(TeamName, PlayerId)> = self
            .players
            .iter()
            .filter(|p| p.is_bot)
            .filter_map(|p| Some((self.team_of(&p.player_id)?, p.player_id.clone())))
            .collect();

        let ready = &mut self
            .round_manager
            .current_round_mut()
            .team_players_ready_for_next_round;
        for (team, bot_id) in bots {
            if !ready[team].contains(&bot_id) {
                ready[team].push(bot_id);
            }
        }
    }
}
