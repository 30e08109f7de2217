use strum::EnumIter;
use strum::IntoEnumIterator;

/// Entries of the main menu in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, strum::Display)]
pub enum MenuAction {
    Connect,
    #[strum(serialize = "Switch Account")]
    SwitchAccount,
    #[strum(serialize = "Sign Out")]
    SignOut,
    #[strum(serialize = "List Information")]
    ListInformation,
    #[strum(serialize = "Open Remote Desktop")]
    OpenRemoteDesktop,
    Quit,
}

impl MenuAction {
    pub fn labels() -> Vec<String> {
        return MenuAction::iter().map(|action| action.to_string()).collect();
    }

    pub fn from_index(index: usize) -> Option<MenuAction> {
        return MenuAction::iter().nth(index);
    }

    pub fn quit_index() -> usize {
        return MenuAction::iter()
            .position(|action| action == MenuAction::Quit)
            .unwrap_or_default();
    }
}
