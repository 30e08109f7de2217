#[cfg(test)]
#[path = "app_test.rs"]
mod tests;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use skymesh_core::installer::InstallTarget;
use skymesh_core::CommandRunner;
use skymesh_core::Installer;
use skymesh_core::LoginClient;
use skymesh_core::MeshCli;
use skymesh_core::RemoteDesktop;
use skymesh_term::wait_for_key_or_timeout;
use skymesh_term::Canvas;
use skymesh_term::CountdownOutcome;
use skymesh_term::DisplayOption;
use skymesh_term::Drawer;
use skymesh_term::KeySource;
use skymesh_term::LineEditor;
use skymesh_term::LineInput;
use skymesh_term::ProgressBar;
use skymesh_term::SelectableMenu;

use crate::configuration::Settings;
use crate::menu_action::MenuAction;

const BACK_LABEL: &str = "Back";
const PASSWORD_MASK: char = '*';

/// How the process should end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The user left through the menu.
    Quit,
    /// Startup stopped early with this exit code.
    Exit(i32),
}

pub struct App<C: Canvas, K: KeySource> {
    drawer: Drawer<C>,
    keys: K,
    settings: Settings,
    cli: MeshCli,
    login: LoginClient,
    installer: Installer,
    remote_desktop: RemoteDesktop,
}

impl<C: Canvas, K: KeySource> App<C, K> {
    pub fn new(drawer: Drawer<C>, keys: K, settings: Settings, runner: Arc<dyn CommandRunner>) -> App<C, K> {
        let cli = MeshCli::new(settings.tool_binary.clone(), Arc::clone(&runner));
        let login = LoginClient::new(settings.login_url.clone());
        let installer = Installer::new(Arc::clone(&runner))
            .with_installer_url(settings.installer_url.clone())
            .with_script_url(settings.install_script_url.clone());
        let remote_desktop = RemoteDesktop::new(runner);

        return App {
            drawer,
            keys,
            settings,
            cli,
            login,
            installer,
            remote_desktop,
        };
    }

    /// Overrides the detected platform for installing and remote desktop.
    pub fn with_target(mut self, target: InstallTarget) -> App<C, K> {
        self.installer = self.installer.with_target(target.clone());
        self.remote_desktop = self.remote_desktop.with_target(target);
        return self;
    }

    pub fn drawer(&self) -> &Drawer<C> {
        return &self.drawer;
    }

    pub fn keys(&self) -> &K {
        return &self.keys;
    }

    pub async fn run(&mut self) -> Result<Outcome> {
        if let Some(outcome) = self.boot().await? {
            return Ok(outcome);
        }

        self.auto_connect().await?;

        if self.settings.trace {
            self.drawer.clear(DisplayOption::DEFAULT)?;
        }

        self.run_menu().await?;
        return Ok(Outcome::Quit);
    }

    /// Makes sure the tool is usable. Returns an outcome when the process
    /// should stop instead of showing the menu.
    async fn boot(&mut self) -> Result<Option<Outcome>> {
        self.drawer
            .print("Checking for Tailscale...", DisplayOption::DEFAULT)?;
        let probe = self.cli.probe().await;
        self.drawer.clear(DisplayOption::NO_FLUSH)?;

        match probe {
            Ok(version) => {
                self.drawer.print(&version, DisplayOption::NO_FLUSH)?;
                self.countdown("Environmental inspection complete.", "continue")
                    .await?;
                return Ok(None);
            }
            Err(err) => {
                log::warn!("tool probe failed: {}", err);
                self.drawer.print(&err.to_string(), DisplayOption::DEFAULT)?;
            }
        }

        if let Err(err) = self.install_tool().await {
            log::error!("installation failed: {:#}", err);
            self.drawer
                .print(&format!("Installation error: {err}"), DisplayOption::DEFAULT)?;
            return Ok(Some(Outcome::Exit(1)));
        }

        self.countdown("Installation is complete. Please run it again.", "exit")
            .await?;
        return Ok(Some(Outcome::Exit(0)));
    }

    async fn install_tool(&mut self) -> Result<()> {
        let dir = self.installer.temp_dir()?;
        let result = self.download_and_install(dir.path()).await;

        self.drawer.print(
            &format!("Removing temp dir: {}", dir.path().display()),
            DisplayOption::DEFAULT,
        )?;
        dir.close()?;

        return result;
    }

    async fn download_and_install(&mut self, dir: &Path) -> Result<()> {
        let artifact = self.installer.artifact_path(dir)?;

        self.drawer
            .print("Downloading Tailscale...", DisplayOption::DEFAULT)?;
        let download = self.installer.fetch().await?;

        let bar = ProgressBar::new(&mut self.drawer, download.total_bytes());
        let drawer = &mut self.drawer;
        download
            .save_to(&artifact, |transferred| bar.update(drawer, transferred))
            .await?;
        self.drawer.print("Download completed", DisplayOption::DEFAULT)?;

        self.drawer
            .print("Installing Tailscale...", DisplayOption::DEFAULT)?;
        self.installer.run(&artifact).await?;
        self.drawer
            .print("Tailscale installed successfully.", DisplayOption::DEFAULT)?;

        return Ok(());
    }

    async fn countdown(&mut self, message: &str, verb: &str) -> Result<CountdownOutcome> {
        return wait_for_key_or_timeout(
            &mut self.drawer,
            &mut self.keys,
            message,
            verb,
            self.settings.countdown,
        )
        .await;
    }

    /// No accounts goes straight to login, a single account is switched to.
    async fn auto_connect(&mut self) -> Result<()> {
        let accounts = match self.cli.list_accounts().await {
            Ok(accounts) => accounts,
            Err(err) => {
                self.drawer
                    .print(&format!("Error: {err}"), DisplayOption::DEFAULT)?;
                return Ok(());
            }
        };
        log::info!("found {} accounts", accounts.len());

        let result = match accounts.accounts() {
            [] => self.connect().await,
            [only] => self.switch_to(only).await,
            _ => Ok(()),
        };
        return self.report(result).await;
    }

    async fn run_menu(&mut self) -> Result<()> {
        let mut menu = SelectableMenu::new(MenuAction::labels())
            .with_quit_index(MenuAction::quit_index())
            .with_policy(self.settings.navigation);

        loop {
            let index = menu.run(&mut self.drawer, &mut self.keys).await?;
            let Some(action) = MenuAction::from_index(index) else {
                self.drawer
                    .print(&format!("Unknown menu option: {index}"), DisplayOption::DEFAULT)?;
                continue;
            };

            if action == MenuAction::Quit {
                self.drawer.clear(DisplayOption::DEFAULT)?;
                return Ok(());
            }

            log::info!("menu action: {}", action);
            self.drawer.clear(DisplayOption::NO_FLUSH)?;
            let result = self.dispatch(action).await;
            self.report(result).await?;
            self.drawer.clear(DisplayOption::NO_FLUSH)?;
        }
    }

    async fn dispatch(&mut self, action: MenuAction) -> Result<()> {
        match action {
            MenuAction::Connect => self.connect().await,
            MenuAction::SwitchAccount => self.switch_account().await,
            MenuAction::SignOut => self.sign_out().await,
            MenuAction::ListInformation => self.list_information().await,
            MenuAction::OpenRemoteDesktop => {
                self.open_remote_desktop().await?;
                self.pause().await
            }
            MenuAction::Quit => Ok(()),
        }
    }

    /// Prints a failed flow and waits, so the menu can carry on.
    async fn report(&mut self, result: Result<()>) -> Result<()> {
        if let Err(err) = result {
            log::error!("{:#}", err);
            self.drawer
                .print(&format!("Error: {err}"), DisplayOption::DEFAULT)?;
            self.pause().await?;
        }
        return Ok(());
    }

    async fn pause(&mut self) -> Result<()> {
        self.drawer
            .print("Press Enter to continue...", DisplayOption::DEFAULT)?;
        self.keys.next_key().await?;
        return Ok(());
    }

    async fn connect(&mut self) -> Result<()> {
        if !self.log_in().await? {
            return Ok(());
        }
        self.show_status().await?;
        self.open_remote_desktop().await?;
        return self.pause().await;
    }

    /// Loops until a key is accepted or the user escapes. Returns whether a
    /// login happened.
    async fn log_in(&mut self) -> Result<bool> {
        loop {
            let Some((account, password)) = self.read_credentials().await? else {
                return Ok(false);
            };

            let key = match self.login.request_key(&account, &password).await {
                Ok(key) => key,
                Err(err) => {
                    self.drawer
                        .print(&format!("Login failed: {err}"), DisplayOption::DEFAULT)?;
                    continue;
                }
            };

            match self.cli.login_with_key(&key).await {
                Ok(output) => {
                    self.drawer
                        .print("Logged in successfully!", DisplayOption::DEFAULT)?;
                    self.drawer.print(&output, DisplayOption::DEFAULT)?;
                    return Ok(true);
                }
                Err(err) => {
                    self.drawer
                        .print(&format!("Login error: {err}"), DisplayOption::DEFAULT)?;
                }
            }
        }
    }

    async fn read_credentials(&mut self) -> Result<Option<(String, String)>> {
        let account = LineEditor::new("Enter your account: ")
            .read_line(&mut self.drawer, &mut self.keys)
            .await?;
        let LineInput::Submitted(account) = account else {
            return Ok(None);
        };

        let password = LineEditor::new("Enter your password: ")
            .masked(PASSWORD_MASK)
            .read_line(&mut self.drawer, &mut self.keys)
            .await?;
        let LineInput::Submitted(password) = password else {
            return Ok(None);
        };

        return Ok(Some((account, password)));
    }

    async fn switch_account(&mut self) -> Result<()> {
        let accounts = self.cli.list_accounts().await?;

        let mut labels: Vec<String> = accounts
            .accounts()
            .iter()
            .map(|account| {
                if accounts.is_current(account) {
                    return format!("*{account}");
                }
                return account.clone();
            })
            .collect();
        labels.push(BACK_LABEL.to_string());

        let mut picker = SelectableMenu::new(labels)
            .with_title("Account : ")
            .with_policy(self.settings.navigation);
        let index = picker.run(&mut self.drawer, &mut self.keys).await?;

        let Some(account) = accounts.accounts().get(index) else {
            return Ok(());
        };
        if accounts.is_current(account) {
            self.drawer.print(
                "It is not possible to select an account that is currently in use!",
                DisplayOption::DEFAULT,
            )?;
            return self.pause().await;
        }

        self.switch_to(account).await?;
        self.show_status().await?;
        self.open_remote_desktop().await?;
        return self.pause().await;
    }

    async fn switch_to(&mut self, account: &str) -> Result<()> {
        let output = self.cli.switch_account(account).await?;
        self.drawer.print(&output, DisplayOption::DEFAULT)?;
        return Ok(());
    }

    async fn sign_out(&mut self) -> Result<()> {
        let output = self.cli.logout().await?;
        self.drawer.print(&output, DisplayOption::DEFAULT)?;
        return self.pause().await;
    }

    async fn list_information(&mut self) -> Result<()> {
        let line = match self.cli.ip().await {
            Ok(ip) => format!("My IP: {}", ip.trim_end()),
            Err(err) => {
                log::warn!("ip lookup failed: {}", err);
                format!("Error getting IP: {err}")
            }
        };
        self.drawer.print(&line, DisplayOption::NO_FLUSH)?;
        self.show_status().await?;
        return self.pause().await;
    }

    async fn show_status(&mut self) -> Result<()> {
        let output = self.cli.status().await?;
        self.drawer.print(&output, DisplayOption::DEFAULT)?;
        return Ok(());
    }

    /// Failures to launch are shown but do not abort the surrounding flow.
    async fn open_remote_desktop(&mut self) -> Result<()> {
        if let Err(err) = self.remote_desktop.open().await {
            log::warn!("remote desktop: {}", err);
            self.drawer.print(&err.to_string(), DisplayOption::NO_FLUSH)?;
        }
        return Ok(());
    }
}
