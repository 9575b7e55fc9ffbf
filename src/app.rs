use rust_decimal::Decimal;
use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

use crate::aggregate::ChartModel;
use crate::api::{HttpAuthGateway, LoginRequest, SignupRequest};
use crate::config::AppConfig;
use crate::format::format_currency;
use crate::ledger::{Category, Entry};
use crate::router::{Page, Screen, NAV_ITEMS};
use crate::session::{self, LocalTokenStore};
use crate::store::{Action, Dashboard, Notice, NoticeKind};

const INPUT_CLASS: &str = "w-[300px] m-2 px-4 py-3 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";
const SUBMIT_CLASS: &str = "px-5 py-2 m-1 rounded-lg bg-[#4CAF50] text-white font-semibold hover:opacity-90 transition-opacity disabled:opacity-50";
const BACK_CLASS: &str = "px-5 py-2 m-1 rounded-lg bg-[#3498db] text-white font-semibold hover:opacity-90 transition-opacity";

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    active_page: Page,
    on_select: Callback<Page>,
    on_logout: Callback<()>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="min-h-screen w-full flex flex-col items-center justify-center p-5 bg-gradient-to-r from-[#3498db] to-[#9b59b6]">
            <h1 class="text-[30px] font-bold text-[#2d3436]">{"Financial Dashboard"}</h1>
            <nav class="mt-5">
                { for NAV_ITEMS.iter().map(|item| {
                    let is_active = item.page == props.active_page;
                    let class_name = if is_active {
                        "m-2 px-5 py-3 text-base rounded bg-[#173E63] text-white"
                    } else {
                        "m-2 px-5 py-3 text-base rounded bg-[#3498db] text-white hover:bg-[#2d83bd]"
                    };
                    let on_select = props.on_select.clone();
                    let page = item.page;

                    html! {
                        <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                            { item.label }
                        </button>
                    }
                }) }
                <button type="button" class="m-2 px-5 py-3 text-base rounded bg-[#3498db] text-white hover:bg-[#2d83bd]" onclick={props.on_logout.reform(|_: MouseEvent| ())}>
                    {"Logout"}
                </button>
            </nav>
            <main class="w-full flex flex-col items-center">
                { for props.children.iter() }
            </main>
        </div>
    }
}

fn panel(title: &'static str, children: Html) -> Html {
    html! {
        <div class="mt-5 p-5 bg-white rounded-lg shadow-md flex flex-col items-center">
            <h3 class="text-lg font-bold text-foreground mb-2">{ title }</h3>
            { children }
        </div>
    }
}

fn notice_banner(notice: &Option<Notice>, on_dismiss: Callback<()>) -> Html {
    match notice {
        Some(notice) => {
            let class_name = match notice.kind {
                NoticeKind::Info => "mt-4 px-4 py-2 rounded-lg bg-green-100 text-green-800 text-sm",
                NoticeKind::Error => "mt-4 px-4 py-2 rounded-lg bg-red-100 text-red-700 text-sm",
            };
            html! {
                <div class={class_name} role="alert">
                    <span>{ notice.text.clone() }</span>
                    <button type="button" class="ml-3 font-bold" onclick={on_dismiss.reform(|_: MouseEvent| ())}>{"×"}</button>
                </div>
            }
        }
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
struct HomePanelProps {
    balance: Decimal,
    currency_symbol: String,
}

#[function_component(HomePanel)]
fn home_panel(props: &HomePanelProps) -> Html {
    panel(
        "Welcome",
        html! {
            <h3 class="text-2xl font-bold text-[#1D617A]">
                { format!("Balance: {}", format_currency(props.balance, &props.currency_symbol)) }
            </h3>
        },
    )
}

#[derive(Properties, PartialEq)]
struct EntryPanelProps {
    category: Category,
    amount: String,
    due_date: String,
    loans: Vec<Entry>,
    currency_symbol: String,
    dispatch: Callback<Action>,
    on_back: Callback<()>,
}

/// Add-entry form shared by all four categories. The loan variant also takes
/// a due date and lists the open loans.
#[function_component(EntryPanel)]
fn entry_panel(props: &EntryPanelProps) -> Html {
    let category = props.category;

    let on_amount = {
        let dispatch = props.dispatch.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            dispatch.emit(Action::EditAmount(category, input.value()));
        })
    };
    let on_due_date = {
        let dispatch = props.dispatch.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            dispatch.emit(Action::EditDueDate(input.value()));
        })
    };
    let on_submit = props.dispatch.reform(move |_: MouseEvent| Action::Submit(category));

    let title = match category {
        Category::Income => "Add Income",
        Category::Expenditure => "Add Expenditure",
        Category::Savings => "Add Savings",
        Category::Loan => "Add Loan",
    };

    panel(
        title,
        html! {
            <>
                <input type="number" placeholder="Amount" class={INPUT_CLASS}
                    value={props.amount.clone()} oninput={on_amount} />
                if category.requires_due_date() {
                    <input type="date" class={INPUT_CLASS}
                        value={props.due_date.clone()} oninput={on_due_date} />
                }
                <div>
                    <button type="button" class={SUBMIT_CLASS} onclick={on_submit}>{ title }</button>
                    <button type="button" class={BACK_CLASS} onclick={props.on_back.reform(|_: MouseEvent| ())}>{"Back to Home"}</button>
                </div>
                if category.requires_due_date() && !props.loans.is_empty() {
                    <LoanList loans={props.loans.clone()} currency_symbol={props.currency_symbol.clone()}
                        on_paid={props.dispatch.reform(Action::DeleteLoan)} />
                }
            </>
        },
    )
}

#[derive(Properties, PartialEq)]
struct LoanListProps {
    loans: Vec<Entry>,
    currency_symbol: String,
    on_paid: Callback<usize>,
}

#[function_component(LoanList)]
fn loan_list(props: &LoanListProps) -> Html {
    html! {
        <div class="mt-4 w-full">
            <h4 class="font-semibold text-foreground">{"Current Loans:"}</h4>
            <ul class="divide-y divide-border">
                { for props.loans.iter().enumerate().map(|(index, loan)| {
                    let due = loan
                        .due_date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default();
                    html! {
                        <li class="flex items-center justify-between gap-4 py-2 text-sm">
                            <span>{ format!("Loan Amount: {}, Due Date: {}", format_currency(loan.amount, &props.currency_symbol), due) }</span>
                            <button type="button" class="px-3 py-1 rounded bg-[#e74c3c] text-white"
                                onclick={props.on_paid.reform(move |_: MouseEvent| index)}>
                                {"Mark as Paid"}
                            </button>
                        </li>
                    }
                }) }
            </ul>
        </div>
    }
}

const CHART_WIDTH: f64 = 480.0;
const CHART_HEIGHT: f64 = 220.0;
const CHART_PAD: f64 = 30.0;

#[derive(Properties, PartialEq)]
struct ChartPanelProps {
    chart: ChartModel,
    currency_symbol: String,
    on_back: Callback<()>,
}

/// Line chart of the four category totals, drawn as inline SVG.
#[function_component(ChartPanel)]
fn chart_panel(props: &ChartPanelProps) -> Html {
    let points = props.chart.line_points(CHART_WIDTH, CHART_HEIGHT);
    let series = props.chart.series();
    let polyline = points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x + CHART_PAD, y + CHART_PAD))
        .collect::<Vec<_>>()
        .join(" ");
    let view_box = format!(
        "0 0 {} {}",
        CHART_WIDTH + 2.0 * CHART_PAD,
        CHART_HEIGHT + 2.0 * CHART_PAD + 20.0
    );

    panel(
        "Visual Representation",
        html! {
            <>
                <svg viewBox={view_box} class="w-[540px] max-w-full" role="img" aria-label="Financial Overview">
                    <polyline points={polyline} fill="none" stroke="#3498db" stroke-width="2" />
                    { for points.iter().zip(series.iter()).map(|((x, y), (category, total))| html! {
                        <g>
                            <circle cx={format!("{:.1}", x + CHART_PAD)} cy={format!("{:.1}", y + CHART_PAD)} r="5" fill={category.color()}>
                                <title>{ format!("{}: {}", category.label(), format_currency(*total, &props.currency_symbol)) }</title>
                            </circle>
                            <text x={format!("{:.1}", x + CHART_PAD)} y={format!("{:.1}", CHART_HEIGHT + 2.0 * CHART_PAD + 10.0)}
                                text-anchor="middle" font-size="12" fill="#2d3436">
                                { category.label() }
                            </text>
                        </g>
                    }) }
                </svg>
                <ul class="flex gap-4 text-sm mt-2">
                    { for series.iter().map(|(category, total)| html! {
                        <li style={format!("color: {}", category.color())}>
                            { format!("{}: {}", category.label(), format_currency(*total, &props.currency_symbol)) }
                        </li>
                    }) }
                </ul>
                <button type="button" class={BACK_CLASS} onclick={props.on_back.reform(|_: MouseEvent| ())}>{"Back to Home"}</button>
            </>
        },
    )
}

fn text_field(kind: &'static str, placeholder: &'static str, value: &UseStateHandle<String>) -> Html {
    let oninput = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            value.set(input.value());
        })
    };
    html! {
        <input type={kind} placeholder={placeholder} class={INPUT_CLASS}
            value={(**value).clone()} oninput={oninput} />
    }
}

#[derive(Properties, PartialEq)]
struct LoginFormProps {
    pending: bool,
    on_login: Callback<LoginRequest>,
    on_signup_page: Callback<()>,
}

#[function_component(LoginForm)]
fn login_form(props: &LoginFormProps) -> Html {
    let username = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let error = use_state(|| None::<String>);

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let on_login = props.on_login.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if username.trim().is_empty() || password.is_empty() {
                error.set(Some("Username and password are required".to_string()));
                return;
            }
            error.set(None);
            on_login.emit(LoginRequest {
                username: username.trim().to_string(),
                password: (*password).clone(),
            });
        })
    };

    html! {
        <form class="flex flex-col items-center" onsubmit={on_submit}>
            <h2 class="text-xl font-bold">{"Login"}</h2>
            { text_field("text", "Username", &username) }
            { text_field("password", "Password", &password) }
            if let Some(msg) = &*error {
                <div class="text-sm text-red-500">{ msg.clone() }</div>
            }
            <div>
                <button type="submit" class={SUBMIT_CLASS} disabled={props.pending}>
                    { if props.pending { "Please wait..." } else { "Login" } }
                </button>
                <button type="button" class={BACK_CLASS} onclick={props.on_signup_page.reform(|_: MouseEvent| ())}>{"Sign Up"}</button>
            </div>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct SignupFormProps {
    pending: bool,
    on_signup: Callback<SignupRequest>,
    on_back: Callback<()>,
}

#[function_component(SignupForm)]
fn signup_form(props: &SignupFormProps) -> Html {
    let name = use_state(|| "".to_string());
    let age = use_state(|| "".to_string());
    let mobile_no = use_state(|| "".to_string());
    let email = use_state(|| "".to_string());
    let username = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let error = use_state(|| None::<String>);

    let on_submit = {
        let fields = (
            name.clone(),
            age.clone(),
            mobile_no.clone(),
            email.clone(),
            username.clone(),
            password.clone(),
        );
        let error = error.clone();
        let on_signup = props.on_signup.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (name, age, mobile_no, email, username, password) = &fields;
            if username.trim().is_empty() || password.is_empty() {
                error.set(Some("Username and password are required".to_string()));
                return;
            }
            error.set(None);
            on_signup.emit(SignupRequest {
                name: name.trim().to_string(),
                age: age.trim().to_string(),
                mobile_no: mobile_no.trim().to_string(),
                email: email.trim().to_string(),
                username: username.trim().to_string(),
                password: (**password).clone(),
            });
        })
    };

    html! {
        <form class="flex flex-col items-center" onsubmit={on_submit}>
            <h2 class="text-xl font-bold">{"Sign Up"}</h2>
            { text_field("text", "Name", &name) }
            { text_field("number", "Age", &age) }
            { text_field("text", "Mobile No.", &mobile_no) }
            { text_field("email", "Email", &email) }
            { text_field("text", "Username", &username) }
            { text_field("password", "Password", &password) }
            if let Some(msg) = &*error {
                <div class="text-sm text-red-500">{ msg.clone() }</div>
            }
            <div>
                <button type="submit" class={SUBMIT_CLASS} disabled={props.pending}>
                    { if props.pending { "Please wait..." } else { "Sign Up" } }
                </button>
                <button type="button" class={BACK_CLASS} onclick={props.on_back.reform(|_: MouseEvent| ())}>{"Back to Login"}</button>
            </div>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: AppConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = props.config.clone();
    let state = {
        let token_key = config.token_key.clone();
        use_reducer(move || Dashboard::restore(&LocalTokenStore::new(token_key)))
    };

    let dispatch = {
        let state = state.clone();
        Callback::from(move |action: Action| state.dispatch(action))
    };
    let navigate = dispatch.reform(Action::Navigate);
    let go_home = dispatch.reform(|_: ()| Action::Navigate(Page::Home));
    let dismiss = dispatch.reform(|_: ()| Action::DismissNotice);

    let on_login = {
        let state = state.clone();
        let config = config.clone();
        Callback::from(move |request: LoginRequest| {
            if state.auth_pending {
                return;
            }
            state.dispatch(Action::AuthStarted);
            let state = state.clone();
            let gateway = HttpAuthGateway::new(config.api_base_url.clone());
            let store = LocalTokenStore::new(config.token_key.clone());
            spawn_local(async move {
                match session::login(&gateway, &store, &request).await {
                    Ok(token) => state.dispatch(Action::Authenticated {
                        token,
                        greeting: "Logged in successfully",
                    }),
                    Err(e) => state.dispatch(Action::AuthFailed(e)),
                }
            });
        })
    };

    let on_signup = {
        let state = state.clone();
        let config = config.clone();
        Callback::from(move |request: SignupRequest| {
            if state.auth_pending {
                return;
            }
            state.dispatch(Action::AuthStarted);
            let state = state.clone();
            let gateway = HttpAuthGateway::new(config.api_base_url.clone());
            let store = LocalTokenStore::new(config.token_key.clone());
            spawn_local(async move {
                match session::signup(&gateway, &store, &request).await {
                    Ok(token) => state.dispatch(Action::Authenticated {
                        token,
                        greeting: "Account created successfully",
                    }),
                    Err(e) => state.dispatch(Action::AuthFailed(e)),
                }
            });
        })
    };

    let on_logout = {
        let state = state.clone();
        let token_key = config.token_key.clone();
        Callback::from(move |_| {
            session::logout(&LocalTokenStore::new(token_key.clone()));
            state.dispatch(Action::LoggedOut);
        })
    };

    let notice = notice_banner(&state.notice, dismiss);
    let symbol = config.currency_symbol.clone();

    match state.screen() {
        Screen::Login => html! {
            <div class="min-h-screen w-full flex flex-col items-center justify-center bg-gradient-to-r from-[#3498db] to-[#9b59b6]">
                <h1 class="text-[30px] font-bold text-[#2d3436]">{"Financial Dashboard"}</h1>
                { notice }
                <LoginForm pending={state.auth_pending} on_login={on_login}
                    on_signup_page={navigate.reform(|_: ()| Page::Signup)} />
            </div>
        },
        Screen::Signup => html! {
            <div class="min-h-screen w-full flex flex-col items-center justify-center bg-gradient-to-r from-[#3498db] to-[#9b59b6]">
                <h1 class="text-[30px] font-bold text-[#2d3436]">{"Financial Dashboard"}</h1>
                { notice }
                <SignupForm pending={state.auth_pending} on_signup={on_signup} on_back={go_home} />
            </div>
        },
        Screen::Dashboard(page) => {
            let content = match page {
                Page::Visual => html! {
                    <ChartPanel chart={state.chart()} currency_symbol={symbol} on_back={go_home} />
                },
                page => match page.form_category() {
                    Some(category) => html! {
                        <EntryPanel
                            category={category}
                            amount={state.drafts.amount(category).to_string()}
                            due_date={state.drafts.due_date().to_string()}
                            loans={state.ledger.entries(Category::Loan).to_vec()}
                            currency_symbol={symbol}
                            dispatch={dispatch}
                            on_back={go_home} />
                    },
                    None => html! {
                        <HomePanel balance={state.ledger.balance()} currency_symbol={symbol} />
                    },
                },
            };

            html! {
                <Layout active_page={page} on_select={navigate} on_logout={on_logout}>
                    { notice }
                    { content }
                </Layout>
            }
        }
    }
}
