use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_router::prelude::*;

use crate::{
    config, hooks::use_unread_count::use_unread_count, router::Route, session::use_session,
};

const NAV_ITEMS: [(Route, &str); 6] = [
    (Route::Dashboard, "Dashboard"),
    (Route::MyOrders, "My Orders"),
    (Route::RentedRo, "Rented ROs"),
    (Route::AmcPlans, "AMC Plans"),
    (Route::ServiceSupport, "Service & Support"),
    (Route::Profile, "My Profile"),
];

#[derive(PartialEq, Properties)]
pub struct Props {
    pub children: Html,
}

/// Frame around every signed-in page: sidebar navigation, header with the
/// unread notification badge, and the page content.
#[function_component(Layout)]
pub fn layout(props: &Props) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let current = use_route::<Route>();
    let sidebar_open = use_bool_toggle(false);
    let unread = use_unread_count();
    let user = session.user();

    let on_toggle_sidebar = {
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |_: MouseEvent| sidebar_open.toggle())
    };

    let on_logout_click = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            log::info!("User logged out");
            session.logout();
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    let nav_links = NAV_ITEMS.iter().map(|(route, label)| {
        let classes = if current.as_ref() == Some(route) {
            classes!("nav-link", "active")
        } else {
            classes!("nav-link", "link-body-emphasis")
        };
        html! {
            <li class="nav-item">
                <Link<Route> to={route.clone()} {classes}>{*label}</Link<Route>>
            </li>
        }
    });

    let sidebar_classes = classes!(
        "col-lg-2",
        "border-end",
        "bg-body-tertiary",
        "p-3",
        (!*sidebar_open).then_some("d-none"),
        "d-lg-flex",
        "flex-column"
    );

    let badge = match unread {
        Some(count) if count > 0 => html! {
            <span class="position-absolute top-0 start-100 translate-middle badge rounded-pill bg-danger">
                {count}
                <span class="visually-hidden">{"unread notifications"}</span>
            </span>
        },
        _ => html! {},
    };

    let (name, email, initial) = match &user {
        Some(user) => (user.display_name(), user.email.clone(), user.initial()),
        None => ("User".to_owned(), String::new(), 'U'),
    };

    html! {
        <div class="container-fluid">
            <div class="row min-vh-100">
                <aside class={sidebar_classes}>
                    <span class="fs-3 fw-bold text-primary mb-4">{"UNIXA"}</span>
                    <ul class="nav nav-pills flex-column mb-auto">
                        { for nav_links }
                    </ul>
                    <button onclick={on_logout_click} class="btn btn-outline-danger mt-4">
                        {"Sign Out"}
                    </button>
                </aside>
                <div class="col-lg-10 d-flex flex-column p-0">
                    <nav class="navbar bg-body border-bottom px-3">
                        <button class="btn btn-outline-secondary d-lg-none" onclick={on_toggle_sidebar}>
                            {"Menu"}
                        </button>
                        <div class="d-flex align-items-center ms-auto gap-3">
                            <a class="btn btn-sm btn-outline-secondary d-none d-sm-inline-block" href={config::WEBSITE_URL}>
                                {"Go to Website"}
                            </a>
                            <Link<Route> to={Route::Notifications} classes={classes!("btn", "btn-light", "position-relative")}>
                                {"Notifications"}
                                {badge}
                            </Link<Route>>
                            <div class="text-end d-none d-md-block">
                                <div class="fw-bold small">{name}</div>
                                <div class="text-muted small text-truncate">{email}</div>
                            </div>
                            <div class="rounded-circle bg-primary text-white fw-bold d-flex align-items-center justify-content-center"
                                 style="width: 2.5rem; height: 2.5rem;">
                                {initial.to_string()}
                            </div>
                        </div>
                    </nav>
                    <main class="flex-grow-1 p-4">
                        {props.children.clone()}
                    </main>
                </div>
            </div>
        </div>
    }
}
