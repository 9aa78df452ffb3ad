use std::path::Path;

use crate::application::advisor::{advise_move, AdviseMoveError, AnalyzePhoto, AnalyzePhotoError};
use crate::application::game::{
    ClearHistory, GameSession, GetHistory, RecordThrow, RecordThrowError, RecordThrowInput,
    ResumeGame, ResumeGameError, StartGame, StartGameError, StartGameInput, UndoThrow,
    UndoThrowError,
};
use crate::application::settings::{GetSettings, UpdateSettings, UpdateSettingsInput};
use crate::console::commands::{parse, Command, CommandError};
use crate::console::render;
use crate::domain::entities::{is_valid_pin, PinState};
use crate::domain::error::GameError;
use crate::domain::repositories::{GameRepository, RepositoryError};
use crate::infrastructure::app_state::AppState;

/// Text to show after a command, and whether to stop reading input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

/// Any failure a command can run into; all are shown to the user
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("No game in progress (start one with 'new' or 'resume')")]
    NoGame,
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    StartGame(#[from] StartGameError),
    #[error(transparent)]
    RecordThrow(#[from] RecordThrowError),
    #[error(transparent)]
    UndoThrow(#[from] UndoThrowError),
    #[error(transparent)]
    ResumeGame(#[from] ResumeGameError),
    #[error(transparent)]
    Advice(#[from] AdviseMoveError),
    #[error(transparent)]
    AnalyzePhoto(#[from] AnalyzePhotoError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Console state: shared services plus the game being played
pub struct Console {
    app: AppState,
    session: Option<GameSession>,
}

impl Console {
    pub fn new(app: AppState) -> Self {
        Self { app, session: None }
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Opening message, pointing at a saved game when there is one
    pub async fn greeting(&self) -> String {
        let mut text = "Mölkky scorekeeper. Type 'help' for commands.".to_string();
        match self.app.game_repo.get_current_game().await {
            Ok(Some(state)) if !state.game_over => {
                text.push_str(&format!(
                    "\nA saved game (round {}) can be continued with 'resume'.",
                    state.round
                ));
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Could not check for a saved game: {}", e),
        }
        text
    }

    /// Parse and run one input line; errors become the reply text
    pub async fn dispatch(&mut self, line: &str) -> Reply {
        let command = match parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Reply::text(""),
            Err(e) => return Reply::text(e.to_string()),
        };

        match self.handle(command).await {
            Ok(reply) => reply,
            Err(e) => {
                if matches!(e, ConsoleError::Repository(_)) {
                    tracing::error!("Command failed: {}", e);
                }
                Reply::text(e.to_string())
            }
        }
    }

    pub async fn handle(&mut self, command: Command) -> Result<Reply, ConsoleError> {
        let app = &self.app;
        let text = match command {
            Command::New(player_names) => {
                let session = StartGame::new(app.game_repo.clone(), app.settings_repo.clone())
                    .execute(StartGameInput { player_names })
                    .await?;
                let text = render::scoreboard(session.state());
                self.session = Some(session);
                text
            }
            Command::Throw(points) => self.record(RecordThrowInput::Points(points)).await?,
            Command::Miss => self.record(RecordThrowInput::Points(0)).await?,
            Command::Pins(pins) => self.record(RecordThrowInput::KnockedPins(pins)).await?,
            Command::Undo => {
                let session = self.session.as_mut().ok_or(ConsoleError::NoGame)?;
                let undone = UndoThrow::new(app.game_repo.clone(), app.settings_repo.clone())
                    .execute(session)
                    .await?;
                if undone {
                    format!("Last throw undone\n{}", render::scoreboard(session.state()))
                } else {
                    "Nothing to undo".to_string()
                }
            }
            Command::Board => render::scoreboard(self.current()?.state()),
            Command::Advise(numbers) => {
                let pins = numbers
                    .iter()
                    .enumerate()
                    .map(|(i, &number)| {
                        if !is_valid_pin(number) {
                            return Err(GameError::InvalidPin(number));
                        }
                        Ok(PinState::standing(number, 50.0 + i as f32 * 25.0, 200.0))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let advice = advise_move(self.current()?.state(), pins)?;
                render::advice(&advice)
            }
            Command::Photo(path) => self.analyze_photo(&path).await?,
            Command::Resume => {
                match ResumeGame::new(app.game_repo.clone()).execute().await? {
                    Some(session) => {
                        let text = format!("Game resumed\n{}", render::scoreboard(session.state()));
                        self.session = Some(session);
                        text
                    }
                    None => "No saved game to resume".to_string(),
                }
            }
            Command::History => {
                let items = GetHistory::new(app.game_repo.clone()).execute().await?;
                render::history(&items)
            }
            Command::ClearHistory => {
                let removed = ClearHistory::new(app.game_repo.clone()).execute().await?;
                format!("Removed {} finished games", removed)
            }
            Command::Settings => {
                let settings = GetSettings::new(app.settings_repo.clone()).execute().await?;
                render::settings(&settings)
            }
            Command::Set { key, enabled } => {
                let settings = UpdateSettings::new(app.settings_repo.clone())
                    .execute(UpdateSettingsInput { key, enabled })
                    .await?;
                render::settings(&settings)
            }
            Command::Help => render::HELP.to_string(),
            Command::Quit => {
                return Ok(Reply {
                    text: "Bye".to_string(),
                    quit: true,
                })
            }
        };

        Ok(Reply::text(text))
    }

    fn current(&self) -> Result<&GameSession, ConsoleError> {
        self.session.as_ref().ok_or(ConsoleError::NoGame)
    }

    async fn record(&mut self, input: RecordThrowInput) -> Result<String, ConsoleError> {
        let session = self.session.as_mut().ok_or(ConsoleError::NoGame)?;
        let output = RecordThrow::new(self.app.game_repo.clone(), self.app.settings_repo.clone())
            .execute(session, input)
            .await?;
        Ok(render::throw_result(&output, session.state()))
    }

    async fn analyze_photo(&self, path: &Path) -> Result<String, ConsoleError> {
        let session = self.current()?;
        let advice = AnalyzePhoto::new(self.app.detector.clone())
            .execute(session.state(), path)
            .await?;
        Ok(render::advice(&advice))
    }
}
