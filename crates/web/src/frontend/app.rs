//! Application root: context wiring, session gate, guarded routing and the
//! shared layout.

use std::sync::Arc;

use leptos::*;
use leptos_router::*;

use purplepaw_api::{ApiClient, AuthApi, ForcedLogout};
use purplepaw_auth::{Session, SessionStorage, SessionStore};

use crate::config::ClientConfig;
use crate::frontend::pages;
use crate::frontend::platform::{LocalStorage, hard_navigate};
use crate::frontend::toast::{ToastList, Toasts};
use crate::layout::Layout;
use crate::login::AuthFlow;
use crate::routes::{Navigation, Router as RouteTable};

/// Everything views need, provided once at the root.
#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub session: Arc<SessionStore>,
    pub client: ApiClient,
    pub routes: Arc<RouteTable>,
    /// Mirrors the session store; updated by its change listener.
    pub current: RwSignal<Session>,
}

impl AppContext {
    pub fn auth_flow(&self, toasts: &Toasts) -> AuthFlow {
        AuthFlow::new(
            AuthApi::new(self.client.clone()),
            self.session.clone(),
            Arc::new(toasts.clone()),
        )
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::default();
    let storage: Arc<dyn SessionStorage> = Arc::new(LocalStorage);
    let session = SessionStore::arc(storage.clone());

    let client = match ApiClient::new(config.client_options(), storage) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(error = %err, "could not build the API client");
            return view! { <p class="fatal">{err.message}</p> }.into_view();
        }
    };
    let client =
        client.with_unauthorized_hook(ForcedLogout::arc(session.clone(), Arc::new(hard_navigate)));

    provide_context(Toasts::new());
    provide_context(AppContext {
        config,
        current: create_rw_signal(session.snapshot()),
        session,
        client,
        routes: Arc::new(RouteTable::default()),
    });

    view! {
        <Router>
            <SessionProvider>
                <Routes>
                    <Route path="/*any" view=Screen/>
                </Routes>
            </SessionProvider>
            <ToastList/>
        </Router>
    }
    .into_view()
}

/// Rehydrates the session and renders nothing until that is done.
#[component]
pub fn SessionProvider(children: ChildrenFn) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let current = ctx.current;

    let subscription = ctx
        .session
        .subscribe(move |session: &Session| current.set(session.clone()));
    ctx.session.initialize();
    current.set(ctx.session.snapshot());

    let session = ctx.session.clone();
    on_cleanup(move || session.unsubscribe(subscription));

    move || (!current.get().is_loading()).then(|| children())
}

#[component]
fn Screen() -> impl IntoView {
    let location = use_location();
    move || view! { <Guarded path=location.pathname.get()/> }
}

/// Applies the route table's guard to `path`: redirects, or renders the page
/// inside the layout when there is a signed-in user.
#[component]
pub fn Guarded(path: String) -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    move || {
        let session = ctx.current.get();
        match ctx.routes.resolve(&path, &session) {
            Navigation::Pending => ().into_view(),
            Navigation::Show { path: target, .. } if target != path => {
                view! { <Redirect path=target/> }.into_view()
            }
            Navigation::Show { page, path } => {
                let content = pages::render(page);
                match Layout::for_session(&session, &path) {
                    Some(layout) => view! { <Frame layout=layout>{content}</Frame> }.into_view(),
                    None => content,
                }
            }
        }
    }
}

#[component]
fn Frame(layout: Layout, children: Children) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let toasts = expect_context::<Toasts>();
    let navigate = use_navigate();

    let logout = move |_: ev::MouseEvent| {
        let to = ctx.auth_flow(&toasts).logout();
        navigate(to, Default::default());
    };

    let entries = layout
        .sidebar
        .into_iter()
        .map(|item| {
            view! {
                <li class:active=item.active>
                    <A href=item.path>{item.label}</A>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="layout">
            <aside class="sidebar">
                <div class="brand">{layout.brand}</div>
                <ul>{entries}</ul>
                <button class="logout" on:click=logout>"Sign out"</button>
            </aside>
            <div class="main">
                <header class="top-bar">
                    <span class="email">{layout.top_bar.email}</span>
                    <span class="role">{layout.top_bar.role}</span>
                </header>
                <main>{children()}</main>
            </div>
        </div>
    }
}
