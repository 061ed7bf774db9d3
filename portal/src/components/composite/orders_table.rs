use api_types::Order;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    components::atoms::status_badge::StatusBadge,
    display::{rupees_or_zero, short_date},
    router::Route,
};

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct Props {
    pub orders: Vec<Order>,
}

fn render_order(order: &Order) -> Html {
    html! {
        <tr>
            <td class="font-monospace">{format!("#{}", order.short_id())}</td>
            <td><StatusBadge status={order.status().to_string()} /></td>
            <td>{short_date(&order.created_at)}</td>
            <td class="text-truncate" style="max-width: 20rem;">{order.item_names()}</td>
            <td class="text-end fw-bold">{rupees_or_zero(order.total)}</td>
            <td class="text-end">
                <Link<Route>
                    to={Route::OrderDetails { order_id: order.id.clone() }}
                    classes={classes!("btn", "btn-sm", "btn-outline-primary")}>
                    {"View"}
                </Link<Route>>
            </td>
        </tr>
    }
}

#[function_component(OrdersTable)]
pub fn orders_table(props: &Props) -> Html {
    let content = if props.orders.is_empty() {
        html! {
            <tr>
                <td colspan="6" class="text-center text-muted">{"You have not placed any orders yet"}</td>
            </tr>
        }
    } else {
        html! { {for props.orders.iter().map(render_order)} }
    };

    html! {
        <table class="table table-striped table-hover align-middle">
            <thead>
                <tr>
                    <th scope="col">{"Order"}</th>
                    <th scope="col">{"Status"}</th>
                    <th scope="col">{"Placed on"}</th>
                    <th scope="col">{"Items"}</th>
                    <th scope="col" class="text-end">{"Total"}</th>
                    <th scope="col"></th>
                </tr>
            </thead>
            <tbody>
                {content}
            </tbody>
        </table>
    }
}
