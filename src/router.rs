use crate::ledger::Category;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Income,
    Expenses,
    Savings,
    Loan,
    Visual,
    Signup,
}

/// What is actually drawn for a given session state and page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Signup,
    Dashboard(Page),
}

pub fn resolve(authenticated: bool, page: Page) -> Screen {
    match (authenticated, page) {
        (false, Page::Signup) => Screen::Signup,
        (false, _) => Screen::Login,
        (true, Page::Signup) => Screen::Dashboard(Page::Home),
        (true, page) => Screen::Dashboard(page),
    }
}

pub struct NavItem {
    pub label: &'static str,
    pub page: Page,
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        label: "Add Income",
        page: Page::Income,
    },
    NavItem {
        label: "Add Expenditure",
        page: Page::Expenses,
    },
    NavItem {
        label: "Add Savings",
        page: Page::Savings,
    },
    NavItem {
        label: "Add Loan",
        page: Page::Loan,
    },
    NavItem {
        label: "Visual Representation",
        page: Page::Visual,
    },
];

impl Page {
    /// The ledger category whose form this page shows, if any.
    pub fn form_category(&self) -> Option<Category> {
        match self {
            Self::Income => Some(Category::Income),
            Self::Expenses => Some(Category::Expenditure),
            Self::Savings => Some(Category::Savings),
            Self::Loan => Some(Category::Loan),
            Self::Home | Self::Visual | Self::Signup => None,
        }
    }

    /// Page to land on once the unauthenticated overlay is gone.
    pub fn after_auth(self) -> Page {
        match self {
            Self::Signup => Self::Home,
            page => page,
        }
    }
}
