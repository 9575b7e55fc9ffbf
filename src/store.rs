//! Dashboard state and the reducer that drives it.
//!
//! Every user action and every auth result becomes an [`Action`]; the reducer
//! produces the next [`Dashboard`] without touching the network or storage.
//! Chart totals are derived from the ledger on read and never stored.

use std::rc::Rc;

use yew::Reducible;

use crate::aggregate::{self, ChartModel};
use crate::error::AuthError;
use crate::ledger::{Category, Ledger};
use crate::router::{self, Page, Screen};
use crate::session::{Session, TokenStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-line message shown above the active panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Unsubmitted form input, one amount field per category plus the loan date.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Drafts {
    income: String,
    expenditure: String,
    savings: String,
    loan: String,
    due_date: String,
}

impl Drafts {
    pub fn amount(&self, category: Category) -> &str {
        match category {
            Category::Income => &self.income,
            Category::Expenditure => &self.expenditure,
            Category::Savings => &self.savings,
            Category::Loan => &self.loan,
        }
    }

    fn amount_mut(&mut self, category: Category) -> &mut String {
        match category {
            Category::Income => &mut self.income,
            Category::Expenditure => &mut self.expenditure,
            Category::Savings => &mut self.savings,
            Category::Loan => &mut self.loan,
        }
    }

    pub fn due_date(&self) -> &str {
        &self.due_date
    }

    fn clear(&mut self, category: Category) {
        self.amount_mut(category).clear();
        if category.requires_due_date() {
            self.due_date.clear();
        }
    }
}

pub enum Action {
    Navigate(Page),
    EditAmount(Category, String),
    EditDueDate(String),
    Submit(Category),
    DeleteLoan(usize),
    AuthStarted,
    Authenticated { token: String, greeting: &'static str },
    AuthFailed(AuthError),
    LoggedOut,
    DismissNotice,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dashboard {
    pub session: Session,
    pub page: Page,
    pub ledger: Ledger,
    pub drafts: Drafts,
    pub notice: Option<Notice>,
    /// Set while a login or signup request is in flight.
    pub auth_pending: bool,
}

impl Dashboard {
    pub fn restore(store: &dyn TokenStore) -> Self {
        Self {
            session: Session::restore(store),
            ..Self::default()
        }
    }

    pub fn screen(&self) -> Screen {
        router::resolve(self.session.authenticated, self.page)
    }

    pub fn chart(&self) -> ChartModel {
        aggregate::recompute(&self.ledger)
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Navigate(page) => {
                self.page = page;
                self.notice = None;
            }
            Action::EditAmount(category, value) => {
                *self.drafts.amount_mut(category) = value;
            }
            Action::EditDueDate(value) => {
                self.drafts.due_date = value;
            }
            Action::Submit(category) => {
                let result = self.ledger.add_entry(
                    category,
                    self.drafts.amount(category),
                    Some(self.drafts.due_date()),
                );
                match result {
                    Ok(_) => {
                        self.drafts.clear(category);
                        self.notice = None;
                    }
                    Err(e) => {
                        log::warn!("rejected {} entry: {:?}", category.label(), e);
                        self.notice = Some(Notice::error(e.to_string()));
                    }
                }
            }
            Action::DeleteLoan(index) => match self.ledger.delete_loan(index) {
                Ok(_) => self.notice = None,
                Err(e) => self.notice = Some(Notice::error(e.to_string())),
            },
            Action::AuthStarted => {
                self.auth_pending = true;
                self.notice = None;
            }
            Action::Authenticated { token, greeting } => {
                self.session = Session::signed_in(token);
                self.page = self.page.after_auth();
                self.auth_pending = false;
                self.notice = Some(Notice::info(greeting));
            }
            Action::AuthFailed(e) => {
                self.auth_pending = false;
                self.notice = Some(Notice::error(e.to_string()));
            }
            Action::LoggedOut => {
                self.session = Session::default();
                self.page = Page::Home;
                self.auth_pending = false;
                self.notice = None;
            }
            Action::DismissNotice => self.notice = None,
        }
    }
}

impl Reducible for Dashboard {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}
