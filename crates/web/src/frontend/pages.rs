//! One component per [`Page`].

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Local, NaiveDate};
use leptos::*;
use leptos_router::*;

use purplepaw_api::models::{Appointment, MedicalRecord, Pet, UserRecord};
use purplepaw_api::{
    AppointmentsApi, ClientsApi, DailyQuery, InventoryApi, PetsApi, SEARCH_KEY, UsersApi,
};
use purplepaw_auth::entries_for;
use purplepaw_table::TableEvent;

use crate::forms::{LoginForm, RegisterForm, ValidationErrors};
use crate::frontend::app::AppContext;
use crate::frontend::platform::LeptosScheduler;
use crate::frontend::table::{ActionHandler, list_view};
use crate::frontend::toast::Toasts;
use crate::login::SubmitOutcome;
use crate::notify::{Notifier, describe};
use crate::routes::Page;
use crate::views::{appointments, clients, inventory, pets, users};

pub fn render(page: Page) -> View {
    match page {
        Page::Login => view! { <LoginPage/> }.into_view(),
        Page::Register => view! { <RegisterPage/> }.into_view(),
        Page::Dashboard => view! { <DashboardPage/> }.into_view(),
        Page::Profile => view! { <ProfilePage/> }.into_view(),
        Page::UserManagement => view! { <UsersPage/> }.into_view(),
        Page::Clients => view! { <ClientsPage/> }.into_view(),
        Page::Inventory => view! { <InventoryPage/> }.into_view(),
        Page::Appointments => view! { <AppointmentsPage title="Today's Appointments"/> }.into_view(),
        Page::MyPets => view! { <MyPetsPage/> }.into_view(),
        Page::PetHistory => view! { <PetHistoryPage/> }.into_view(),
        Page::MyAppointments => view! { <AppointmentsPage title="My Appointments"/> }.into_view(),
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
fn Field(
    label: &'static str,
    name: &'static str,
    #[prop(default = "text")] kind: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<ValidationErrors>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span>{label}</span>
            <input
                type=kind
                name=name
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {move || {
                errors.with(|e| {
                    e.get(name).map(|message| view! { <small class="error">{message.to_string()}</small> })
                })
            }}
        </label>
    }
}

/// Shared submit handling: clear field errors on failure, follow the
/// redirect on success.
fn finish<N>(outcome: SubmitOutcome, errors: RwSignal<ValidationErrors>, navigate: N)
where
    N: Fn(&str, NavigateOptions),
{
    match outcome {
        SubmitOutcome::Invalid(found) => errors.set(found),
        SubmitOutcome::Failed(_) => errors.set(ValidationErrors::default()),
        SubmitOutcome::SignedIn { redirect } => {
            errors.set(ValidationErrors::default());
            navigate(redirect, Default::default());
        }
    }
}

#[component]
fn LoginPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let toasts = expect_context::<Toasts>();
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let errors = create_rw_signal(ValidationErrors::default());
    let submitting = create_rw_signal(false);
    let navigate = use_navigate();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let flow = ctx.auth_flow(&toasts);
        let navigate = navigate.clone();
        submitting.set(true);
        spawn_local(async move {
            finish(flow.login(&form).await, errors, navigate);
            submitting.set(false);
        });
    };

    view! {
        <div class="auth-card">
            <h1>"PurplePaw"</h1>
            <form on:submit=on_submit>
                <Field label="Email" name="email" value=email errors=errors/>
                <Field label="Password" name="password" kind="password" value=password errors=errors/>
                <button type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <A href="/register">"Create an account"</A>
        </div>
    }
}

#[component]
fn RegisterPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let toasts = expect_context::<Toasts>();
    let email = create_rw_signal(String::new());
    let first_name = create_rw_signal(String::new());
    let last_name = create_rw_signal(String::new());
    let phone = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let confirm_password = create_rw_signal(String::new());
    let errors = create_rw_signal(ValidationErrors::default());
    let submitting = create_rw_signal(false);
    let navigate = use_navigate();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let form = RegisterForm {
            email: email.get_untracked(),
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            phone: phone.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        let flow = ctx.auth_flow(&toasts);
        let navigate = navigate.clone();
        submitting.set(true);
        spawn_local(async move {
            finish(flow.register(&form).await, errors, navigate);
            submitting.set(false);
        });
    };

    view! {
        <div class="auth-card">
            <h1>"Create your account"</h1>
            <form on:submit=on_submit>
                <Field label="Email" name="email" value=email errors=errors/>
                <Field label="First name" name="firstName" value=first_name errors=errors/>
                <Field label="Last name" name="lastName" value=last_name errors=errors/>
                <Field label="Phone" name="phone" kind="tel" value=phone errors=errors/>
                <Field label="Password" name="password" kind="password" value=password errors=errors/>
                <Field
                    label="Confirm password"
                    name="confirmPassword"
                    kind="password"
                    value=confirm_password
                    errors=errors
                />
                <button type="submit" disabled=move || submitting.get()>"Register"</button>
            </form>
            <A href="/login">"Already have an account? Sign in"</A>
        </div>
    }
}

#[component]
fn DashboardPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let session = ctx.current.get_untracked();
    let name = session.identity().map(|i| i.display_name()).unwrap_or_default();
    let shortcuts = session
        .primary_role()
        .map(entries_for)
        .unwrap_or_default()
        .iter()
        .filter(|entry| entry.path != "/dashboard")
        .map(|entry| view! { <li><A href=entry.path>{entry.label}</A></li> })
        .collect_view();

    view! {
        <section class="dashboard">
            <h2>{format!("Welcome, {name}")}</h2>
            <ul class="shortcuts">{shortcuts}</ul>
        </section>
    }
}

#[component]
fn ProfilePage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let session = ctx.current.get_untracked();
    let Some(identity) = session.identity().cloned() else {
        return ().into_view();
    };
    let roles = identity
        .roles
        .iter()
        .map(|r| r.as_str().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    view! {
        <section class="profile">
            <h2>"My Profile"</h2>
            <dl>
                <dt>"Name"</dt><dd>{identity.display_name()}</dd>
                <dt>"Email"</dt><dd>{identity.email.clone()}</dd>
                <dt>"Roles"</dt><dd>{roles}</dd>
            </dl>
        </section>
    }
    .into_view()
}

#[component]
fn UsersPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let toasts = expect_context::<Toasts>();
    let api = UsersApi::new(ctx.client.clone());

    let on_action: ActionHandler<UserRecord> = {
        let api = api.clone();
        let toasts = toasts.clone();
        Rc::new(move |action, user, refetch| {
            if action == users::DELETE
                && !confirm(&format!("Delete {}? This cannot be undone.", user.full_name()))
            {
                return;
            }
            let api = api.clone();
            let toasts = toasts.clone();
            let action = action.to_string();
            spawn_local(async move {
                match users::perform(&api, &user, &action).await {
                    Ok(true) if action == users::DELETE => {
                        toasts.success("User deleted");
                        refetch();
                    }
                    Ok(true) => {
                        toasts.success("User status updated");
                        refetch();
                    }
                    Ok(false) => tracing::debug!(action, "no inline handler"),
                    Err(err) => toasts.error(&describe(&err)),
                }
            });
        })
    };

    let list = list_view(
        api,
        users::default_request(ctx.config.page_size),
        users::columns(),
        Rc::new(toasts),
        Some(on_action),
    );

    view! {
        <section>
            <h2>"User Management"</h2>
            {list.view}
        </section>
    }
}

#[component]
fn ClientsPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let toasts = expect_context::<Toasts>();

    let on_action: ActionHandler<UserRecord> = {
        let toasts = toasts.clone();
        Rc::new(move |action, client, _| {
            if action == clients::SELECT {
                toasts.info(&format!("{} selected", client.full_name()));
            }
        })
    };
    let list = list_view(
        ClientsApi::new(ctx.client.clone()),
        clients::default_request(ctx.config.page_size),
        clients::columns(),
        Rc::new(toasts),
        Some(on_action),
    );

    let term = create_rw_signal(String::new());
    let search = Rc::new(RefCell::new(clients::SearchBox::new(
        LeptosScheduler,
        ctx.config.search_debounce,
        move |value| term.set(value),
    )));

    let handle = list.handle.clone();
    create_effect(move |previous: Option<()>| {
        let value = term.get();
        if previous.is_some() {
            handle.send(TableEvent::Filter {
                key: SEARCH_KEY.to_string(),
                value,
            });
        }
    });

    let on_input = {
        let search = search.clone();
        move |ev: ev::Event| search.borrow_mut().input(&event_target_value(&ev))
    };
    let on_clear = move |_: ev::MouseEvent| search.borrow_mut().clear();

    view! {
        <section>
            <h2>"Clients"</h2>
            <div class="search">
                <input
                    type="search"
                    placeholder="Search by name"
                    prop:value=move || term.get()
                    on:input=on_input
                />
                <button on:click=on_clear>"Clear"</button>
            </div>
            {list.view}
        </section>
    }
}

#[component]
fn InventoryPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let toasts = expect_context::<Toasts>();

    let list = list_view(
        InventoryApi::new(ctx.client.clone()),
        inventory::default_request(ctx.config.page_size),
        inventory::columns(),
        Rc::new(toasts),
        None,
    );
    let rows = list.rows;

    view! {
        <section>
            <h2>"Inventory"</h2>
            {move || {
                let alerts = inventory::alert_lines(&rows.get());
                (!alerts.is_empty()).then(|| view! {
                    <div class="alert warning">
                        <strong>"Low stock"</strong>
                        <ul>{alerts.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}</ul>
                    </div>
                })
            }}
            {list.view}
        </section>
    }
}

/// The signed-in user's agenda; clients see the same daily view under their
/// own id.
#[component]
fn AppointmentsPage(title: &'static str) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let toasts = expect_context::<Toasts>();
    let date = create_rw_signal(Local::now().date_naive());

    let Some(veterinarian_id) = ctx.current.get_untracked().identity().map(|i| i.id.clone())
    else {
        return ().into_view();
    };
    let api = AppointmentsApi::new(ctx.client.clone());

    let on_action: ActionHandler<Appointment> = {
        let api = api.clone();
        let toasts = toasts.clone();
        Rc::new(move |action, appointment, refetch| {
            if action != appointments::CANCEL || !confirm("Cancel this appointment?") {
                return;
            }
            let api = api.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                match api.cancel(&appointment.id).await {
                    Ok(()) => {
                        toasts.success("Appointment cancelled");
                        refetch();
                    }
                    Err(err) => toasts.error(&describe(&err)),
                }
            });
        })
    };

    let agenda = move || {
        let source = api.for_day(DailyQuery {
            date: date.get(),
            veterinarian_id: veterinarian_id.clone(),
        });
        list_view(
            source,
            appointments::default_request(ctx.config.page_size),
            appointments::columns(),
            Rc::new(toasts.clone()),
            Some(on_action.clone()),
        )
        .view
    };

    view! {
        <section>
            <h2>{title}</h2>
            <input
                type="date"
                prop:value=move || date.get().format("%Y-%m-%d").to_string()
                on:change=move |ev| {
                    if let Ok(day) = NaiveDate::parse_from_str(&event_target_value(&ev), "%Y-%m-%d") {
                        date.set(day);
                    }
                }
            />
            {agenda}
        </section>
    }
    .into_view()
}

#[component]
fn MyPetsPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let toasts = expect_context::<Toasts>();
    let navigate = use_navigate();

    let Some(client_id) = ctx.current.get_untracked().identity().map(|i| i.id.clone()) else {
        return ().into_view();
    };

    let on_action: ActionHandler<Pet> = Rc::new(move |action, pet, _| {
        if action == pets::HISTORY {
            navigate(&pets::history_path(&pet.id), Default::default());
        }
    });
    let list = list_view(
        PetsApi::new(ctx.client.clone()).owned_by(client_id),
        pets::default_request(ctx.config.page_size),
        pets::columns(),
        Rc::new(toasts),
        Some(on_action),
    );

    view! {
        <section>
            <h2>"My Pets"</h2>
            {list.view}
        </section>
    }
    .into_view()
}

#[component]
fn PetHistoryPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let toasts = expect_context::<Toasts>();
    let path = use_location().pathname.get_untracked();

    let Some(pet_id) = ctx
        .routes
        .route(&path)
        .and_then(|route| route.param(&path, "petId"))
        .map(str::to_string)
    else {
        return ().into_view();
    };

    let selected = create_rw_signal(None::<MedicalRecord>);
    let on_action: ActionHandler<MedicalRecord> = Rc::new(move |action, record, _| {
        if action == pets::DETAILS {
            selected.set(Some(record));
        }
    });
    let list = list_view(
        PetsApi::new(ctx.client.clone()).history_of(pet_id),
        pets::history_request(ctx.config.page_size),
        pets::history_columns(),
        Rc::new(toasts),
        Some(on_action),
    );
    let rows = list.rows;

    let details = move || {
        selected.get().map(|record| {
            let items = pets::record_details(&record)
                .into_iter()
                .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                .collect_view();
            view! {
                <aside class="details">
                    <h3>"Visit details"</h3>
                    <dl>{items}</dl>
                    <button on:click=move |_| selected.set(None)>"Close"</button>
                </aside>
            }
        })
    };

    view! {
        <section>
            <A href="/my-pets">"Back"</A>
            <h2>{move || pets::history_title(&rows.get())}</h2>
            {list.view}
            {details}
        </section>
    }
    .into_view()
}
