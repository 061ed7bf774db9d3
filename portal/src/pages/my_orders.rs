use yew::prelude::*;

use crate::{
    api::orders_api,
    components::composite::orders_table::OrdersTable,
    hooks::use_fetch::use_fetch,
    pages::render_fetch,
};

#[function_component(MyOrdersPage)]
pub fn my_orders_page() -> Html {
    let orders = use_fetch((), |api, _| async move { orders_api::list_orders(&api).await });

    html! {
        <div class="container-fluid">
            <h1 class="h3 mb-4">{"My Orders"}</h1>
            {render_fetch(orders.state(), "Failed to load orders", |orders| html! {
                <OrdersTable orders={orders.clone()} />
            })}
        </div>
    }
}
