use api_types::{Order, OrderItem, RefundRequest};
use yew::{platform::spawn_local, prelude::*};
use yew_hooks::prelude::*;
use yew_router::prelude::*;

use crate::{
    api::{orders_api, use_api},
    components::{
        atoms::{
            notice::{Notice, NoticeAlert},
            status_badge::StatusBadge,
        },
        composite::{confirm_button::ConfirmButton, refund_modal::RefundModal},
    },
    display::{rupees, rupees_or_zero, short_date},
    hooks::use_fetch::use_fetch,
    pages::render_fetch,
    router::Route,
};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub order_id: AttrValue,
}

fn render_item(item: &OrderItem) -> Html {
    let details: Vec<&str> = [item.variant.as_deref(), item.color.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    html! {
        <li class="list-group-item d-flex align-items-center gap-3">
            if let Some(url) = item.image_url() {
                <img src={url.to_owned()} alt={item.product_name.clone()} class="rounded" style="width: 4rem; height: 4rem; object-fit: cover;" />
            }
            <div class="flex-grow-1">
                <div class="fw-bold">{&item.product_name}</div>
                <div class="small text-muted">{details.join(" / ")}</div>
                <div class="small">{format!("Qty: {}", item.quantity)}</div>
            </div>
            <div class="fw-bold">{rupees_or_zero(item.product_price)}</div>
        </li>
    }
}

fn render_summary(order: &Order) -> Html {
    let address = order.shipping_address.clone().unwrap_or_default();
    let address_line = [address.street, address.city, address.state, address.postal_code]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
    html! {
        <>
            <div class="card mb-3">
                <div class="card-body">
                    <h2 class="h6 text-muted text-uppercase">{"Price summary"}</h2>
                    <div class="d-flex justify-content-between">
                        <span>{"Subtotal"}</span><span>{rupees_or_zero(order.subtotal)}</span>
                    </div>
                    if let Some(discount) = order.discount.filter(|discount| *discount > 0.0) {
                        <div class="d-flex justify-content-between text-success">
                            <span>{"Discount"}</span><span>{format!("-{}", rupees(discount))}</span>
                        </div>
                    }
                    <hr />
                    <div class="d-flex justify-content-between fw-bold">
                        <span>{"Total"}</span><span>{rupees_or_zero(order.total)}</span>
                    </div>
                </div>
            </div>
            <div class="card mb-3">
                <div class="card-body">
                    <h2 class="h6 text-muted text-uppercase">{"Shipping address"}</h2>
                    <div class="fw-bold">{address.name.unwrap_or_default()}</div>
                    <div class="small">{address_line}</div>
                    if let Some(phone) = address.phone {
                        <div class="small">{phone}</div>
                    }
                </div>
            </div>
            <div class="card">
                <div class="card-body">
                    <h2 class="h6 text-muted text-uppercase">{"Payment"}</h2>
                    <div>{order.payment_method.clone().unwrap_or_else(|| "N/A".to_owned())}</div>
                    if let Some(status) = &order.payment_status {
                        <StatusBadge status={status.clone()} />
                    }
                </div>
            </div>
        </>
    }
}

#[function_component(OrderDetailsPage)]
pub fn order_details_page(props: &Props) -> Html {
    let api = use_api();
    let busy = use_bool_toggle(false);
    let refund_open = use_bool_toggle(false);
    let notice = use_state(|| None::<Notice>);

    let order = use_fetch(props.order_id.clone(), |api, order_id| async move {
        orders_api::get_order(&api, &order_id).await
    });

    let on_cancel = {
        let api = api.clone();
        let busy = busy.clone();
        let notice = notice.clone();
        let order = order.clone();
        let order_id = props.order_id.clone();
        Callback::from(move |_: ()| {
            let api = api.clone();
            let busy = busy.clone();
            let notice = notice.clone();
            let order = order.clone();
            let order_id = order_id.clone();
            busy.set(true);
            spawn_local(async move {
                match orders_api::cancel_order(&api, &order_id).await {
                    Ok(_) => {
                        notice.set(Some(Notice::Success("Order cancelled".to_owned())));
                        order.reload();
                    }
                    Err(error) => notice.set(Some(Notice::Error(
                        error.user_message("Failed to cancel order"),
                    ))),
                }
                busy.set(false);
            });
        })
    };

    let on_refund = {
        let api = api.clone();
        let busy = busy.clone();
        let refund_open = refund_open.clone();
        let notice = notice.clone();
        let order_id = props.order_id.clone();
        Callback::from(move |request: RefundRequest| {
            let api = api.clone();
            let busy = busy.clone();
            let refund_open = refund_open.clone();
            let notice = notice.clone();
            let order_id = order_id.clone();
            busy.set(true);
            spawn_local(async move {
                match orders_api::request_refund(&api, &order_id, &request).await {
                    Ok(response) => {
                        refund_open.set(false);
                        notice.set(Some(Notice::Success(
                            response
                                .message
                                .unwrap_or_else(|| "Refund request submitted".to_owned()),
                        )));
                    }
                    Err(error) => notice.set(Some(Notice::Error(
                        error.user_message("Failed to request refund"),
                    ))),
                }
                busy.set(false);
            });
        })
    };

    let on_open_refund = {
        let refund_open = refund_open.clone();
        Callback::from(move |_: MouseEvent| refund_open.set(true))
    };
    let on_close_refund = {
        let refund_open = refund_open.clone();
        Callback::from(move |_: ()| refund_open.set(false))
    };
    let on_close_notice = {
        let notice = notice.clone();
        Callback::from(move |_: ()| notice.set(None))
    };

    let content = render_fetch(order.state(), "Failed to load order", |found| {
        let Some(order) = found else {
            return html! {
                <div class="text-center py-5">
                    <h2 class="h4">{"Order not found"}</h2>
                    <Link<Route> to={Route::MyOrders}>{"Back to my orders"}</Link<Route>>
                </div>
            };
        };
        let status = order.status();
        html! {
            <>
                <div class="d-flex flex-wrap justify-content-between align-items-center mb-4 gap-2">
                    <div>
                        <Link<Route> to={Route::MyOrders} classes={classes!("small")}>{"My Orders"}</Link<Route>>
                        <h1 class="h3 mb-0">{format!("Order #{}", order.short_id())}</h1>
                        <span class="small text-muted">{format!("Placed on {}", short_date(&order.created_at))}</span>
                    </div>
                    <div class="d-flex align-items-center gap-2">
                        <StatusBadge status={status.to_string()} />
                        if order.can_cancel() {
                            <ConfirmButton
                                label="Cancel order"
                                prompt="Cancel this order? This cannot be undone."
                                confirm_label="Yes, cancel"
                                class={classes!("btn", "btn-outline-danger")}
                                disabled={*busy}
                                on_confirm={on_cancel.clone()} />
                        }
                        if order.can_request_refund() {
                            <button class="btn btn-outline-primary" disabled={*busy} onclick={on_open_refund.clone()}>
                                {"Request refund"}
                            </button>
                        }
                    </div>
                </div>
                <div class="row g-3">
                    <div class="col-lg-8">
                        <div class="card">
                            <div class="card-header">{format!("{} Items", order.items.len())}</div>
                            <ul class="list-group list-group-flush">
                                { for order.items.iter().map(render_item) }
                            </ul>
                        </div>
                    </div>
                    <div class="col-lg-4">
                        {render_summary(order)}
                    </div>
                </div>
                if *refund_open {
                    <RefundModal
                        order_label={order.short_id()}
                        busy={*busy}
                        on_submit={on_refund.clone()}
                        on_close={on_close_refund.clone()} />
                }
            </>
        }
    });

    html! {
        <div class="container-fluid">
            <NoticeAlert notice={(*notice).clone()} on_close={on_close_notice} />
            {content}
        </div>
    }
}
