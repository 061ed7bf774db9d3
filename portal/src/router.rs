use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    components::{atoms::spinner::Spinner, composite::layout::Layout},
    pages::{
        amc_plans::AmcPlansPage, dashboard::DashboardPage, login::LoginPage, my_amcs::MyAmcsPage,
        my_orders::MyOrdersPage, notifications::NotificationsPage,
        order_details::OrderDetailsPage, profile::ProfilePage, rented_ro::RentedRoPage,
        service_support::ServiceSupportPage,
    },
    session::{
        handoff,
        storage::{BrowserStorage, SessionStorage},
        use_session, SessionStatus,
    },
};

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/")]
    Root,
    #[at("/dashboard")]
    Dashboard,
    #[at("/my-orders")]
    MyOrders,
    #[at("/orders/:order_id")]
    OrderDetails { order_id: String },
    #[at("/rented-ro")]
    RentedRo,
    #[at("/amc-plans")]
    AmcPlans,
    #[at("/my-amcs")]
    MyAmcs,
    #[at("/service-support")]
    ServiceSupport,
    #[at("/notifications")]
    Notifications,
    #[at("/profile")]
    Profile,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision {
    Loading,
    Render,
    Redirect(Route),
}

/// Decides what a route shows for the current session status.
/// `handoff_pending` is set when the route was entered carrying a token
/// from another application that the page itself will consume.
pub fn guard(route: &Route, status: SessionStatus, handoff_pending: bool) -> GuardDecision {
    if status == SessionStatus::Loading {
        return GuardDecision::Loading;
    }
    let authenticated = status == SessionStatus::Authenticated;
    match route {
        Route::NotFound => GuardDecision::Redirect(Route::Login),
        Route::Root if authenticated => GuardDecision::Redirect(Route::Dashboard),
        Route::Root => GuardDecision::Redirect(Route::Login),
        Route::Login if authenticated && !handoff_pending => {
            GuardDecision::Redirect(Route::Dashboard)
        }
        Route::Login => GuardDecision::Render,
        _ if authenticated || handoff_pending => GuardDecision::Render,
        _ => GuardDecision::Redirect(Route::Login),
    }
}

/// Whether entering `route` offers a token the page will sign in with. The
/// storage slot only counts for a visitor who is not signed in, since a
/// signed-in dashboard leaves it alone.
fn handoff_offered(
    route: &Route,
    status: SessionStatus,
    query: &str,
    slot_filled: bool,
) -> bool {
    match route {
        Route::Login => handoff::token_from_query(query).is_some(),
        Route::Dashboard => slot_filled && status != SessionStatus::Authenticated,
        _ => false,
    }
}

fn render_page(route: &Route, on_handoff_settled: Callback<()>) -> Html {
    match route {
        Route::Login => html! { <LoginPage {on_handoff_settled} /> },
        Route::Dashboard => html! { <DashboardPage {on_handoff_settled} /> },
        Route::MyOrders => html! { <MyOrdersPage /> },
        Route::OrderDetails { order_id } => html! { <OrderDetailsPage order_id={order_id.clone()} /> },
        Route::RentedRo => html! { <RentedRoPage /> },
        Route::AmcPlans => html! { <AmcPlansPage /> },
        Route::MyAmcs => html! { <MyAmcsPage /> },
        Route::ServiceSupport => html! { <ServiceSupportPage /> },
        Route::Notifications => html! { <NotificationsPage /> },
        Route::Profile => html! { <ProfilePage /> },
        Route::Root | Route::NotFound => html! {},
    }
}

#[derive(Properties, PartialEq)]
struct GuardedProps {
    route: Route,
}

#[function_component(Guarded)]
fn guarded(props: &GuardedProps) -> Html {
    let session = use_session();
    let location = use_location();
    // Set when the route is entered with a token and cleared by the page once
    // the sign-in attempt has settled either way.
    let handoff_pending = {
        let route = props.route.clone();
        let status = session.status();
        let query = location
            .as_ref()
            .map(|location| location.query_str().to_owned())
            .unwrap_or_default();
        use_state(move || {
            let slot_filled = route == Route::Dashboard
                && BrowserStorage.get(handoff::STORAGE_KEY).is_some();
            handoff_offered(&route, status, &query, slot_filled)
        })
    };
    let on_handoff_settled = {
        let handoff_pending = handoff_pending.clone();
        Callback::from(move |_: ()| handoff_pending.set(false))
    };

    match guard(&props.route, session.status(), *handoff_pending) {
        GuardDecision::Loading => html! {
            <div class="d-flex vh-100 justify-content-center align-items-center">
                <Spinner />
            </div>
        },
        GuardDecision::Redirect(to) => html! { <Redirect<Route> to={to} /> },
        GuardDecision::Render if props.route == Route::Login => {
            render_page(&props.route, on_handoff_settled)
        }
        GuardDecision::Render => html! {
            <Layout>{render_page(&props.route, on_handoff_settled)}</Layout>
        },
    }
}

pub fn switch(route: Route) -> Html {
    html! { <Guarded key={route.to_path()} route={route.clone()} /> }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTECTED: [Route; 9] = [
        Route::Dashboard,
        Route::MyOrders,
        Route::RentedRo,
        Route::AmcPlans,
        Route::MyAmcs,
        Route::ServiceSupport,
        Route::Notifications,
        Route::Profile,
        Route::Root,
    ];

    #[test]
    fn loading_session_shows_placeholder_everywhere() {
        for route in PROTECTED.iter().chain([&Route::Login, &Route::NotFound]) {
            assert_eq!(
                guard(route, SessionStatus::Loading, false),
                GuardDecision::Loading,
                "route={route:?}"
            );
        }
    }

    #[test]
    fn anonymous_visitor_is_sent_to_login() {
        for route in &PROTECTED {
            assert_eq!(
                guard(route, SessionStatus::Anonymous, false),
                GuardDecision::Redirect(Route::Login),
                "route={route:?}"
            );
        }
        let order = Route::OrderDetails {
            order_id: "abc".to_owned(),
        };
        assert_eq!(
            guard(&order, SessionStatus::Anonymous, false),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(
            guard(&Route::Login, SessionStatus::Anonymous, false),
            GuardDecision::Render
        );
    }

    #[test]
    fn authenticated_user_skips_login() {
        assert_eq!(
            guard(&Route::Login, SessionStatus::Authenticated, false),
            GuardDecision::Redirect(Route::Dashboard)
        );
        assert_eq!(
            guard(&Route::Root, SessionStatus::Authenticated, false),
            GuardDecision::Redirect(Route::Dashboard)
        );
        assert_eq!(
            guard(&Route::Profile, SessionStatus::Authenticated, false),
            GuardDecision::Render
        );
    }

    #[test]
    fn pending_handoff_lets_the_page_consume_its_token() {
        assert_eq!(
            guard(&Route::Login, SessionStatus::Authenticated, true),
            GuardDecision::Render
        );
        assert_eq!(
            guard(&Route::Dashboard, SessionStatus::Anonymous, true),
            GuardDecision::Render
        );
    }

    #[test]
    fn leftover_slot_does_not_shield_a_signed_in_user() {
        let offered = handoff_offered(&Route::Dashboard, SessionStatus::Authenticated, "", true);
        assert!(!offered);

        // the overview request answers 401 and the session is dropped
        assert_eq!(
            guard(&Route::Dashboard, SessionStatus::Anonymous, offered),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn handoff_is_offered_only_with_a_token_at_hand() {
        assert!(handoff_offered(&Route::Dashboard, SessionStatus::Anonymous, "", true));
        assert!(!handoff_offered(&Route::Dashboard, SessionStatus::Anonymous, "", false));
        assert!(handoff_offered(&Route::Login, SessionStatus::Authenticated, "?token=T", false));
        assert!(!handoff_offered(&Route::Login, SessionStatus::Anonymous, "?token=", true));
        assert!(!handoff_offered(&Route::Profile, SessionStatus::Anonymous, "?token=T", true));
    }

    #[test]
    fn settled_handoff_no_longer_holds_off_the_redirect() {
        let offered = handoff_offered(&Route::Dashboard, SessionStatus::Anonymous, "", true);
        assert_eq!(
            guard(&Route::Dashboard, SessionStatus::Anonymous, offered),
            GuardDecision::Render
        );

        // the stored token was rejected and the page reported it settled
        let offered = false;
        assert_eq!(
            guard(&Route::Dashboard, SessionStatus::Anonymous, offered),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn unknown_paths_fall_back_to_login() {
        assert_eq!(Route::recognize("/nowhere"), Some(Route::NotFound));
        assert_eq!(
            guard(&Route::NotFound, SessionStatus::Authenticated, false),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn order_route_carries_its_id() {
        assert_eq!(
            Route::recognize("/orders/64f0c2"),
            Some(Route::OrderDetails {
                order_id: "64f0c2".to_owned()
            })
        );
        assert_eq!(Route::MyOrders.to_path(), "/my-orders");
    }
}
