//! Application shell: tabbed views, the order cache, detail panes, and
//! toast notifications.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::Order;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::format;

const NOTIFICATION_TTL: Duration = Duration::from_secs(5);
const COPY_FEEDBACK_TTL: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Search,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotificationKind {
    Success,
    Error,
}

struct Notification {
    message: String,
    kind: NotificationKind,
    raised_at: Instant,
}

enum DetailPane {
    Empty,
    Loading,
    Ready {
        order: Box<Order>,
        show_raw: bool,
        copied_at: Option<Instant>,
    },
    Failed(String),
}

impl DetailPane {
    fn ready(order: Order) -> Self {
        DetailPane::Ready {
            order: Box::new(order),
            show_raw: false,
            copied_at: None,
        }
    }
}

pub struct OrderWatchApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    server_url: String,
    refresh_interval: Duration,
    status: String,

    view: AppView,
    uid_input: String,
    search_error: Option<String>,
    search_detail: DetailPane,

    // Cache of the last full-list response, in server order. The selection
    // is a uid, not an index: it is re-resolved against the cache on every
    // refresh.
    orders: Vec<Order>,
    selected_uid: Option<String>,
    list_detail: DetailPane,
    list_loading: bool,
    list_error: Option<String>,
    auto_refresh: bool,
    generate_in_flight: bool,

    notifications: Vec<Notification>,
}

impl OrderWatchApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url: String,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url,
            refresh_interval,
            status: "Starting backend worker...".to_string(),
            view: AppView::Search,
            uid_input: String::new(),
            search_error: None,
            search_detail: DetailPane::Empty,
            orders: Vec::new(),
            selected_uid: None,
            list_detail: DetailPane::Empty,
            list_loading: false,
            list_error: None,
            auto_refresh: false,
            generate_in_flight: false,
            notifications: Vec::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::OrderLoaded(order) => {
                    self.search_detail = DetailPane::ready(*order);
                }
                UiEvent::OrderLookupFailed(message) => {
                    self.search_detail = DetailPane::Failed(message);
                }
                UiEvent::OrdersLoaded(orders) => {
                    self.orders = orders;
                    self.list_loading = false;
                    self.list_error = None;
                    if let Some(uid) = self.selected_uid.clone() {
                        // Re-render the selection only if it survived the
                        // refresh; otherwise the detail pane stays as-is.
                        if let Some(order) = self.orders.iter().find(|o| o.order_uid == uid) {
                            self.list_detail = DetailPane::ready(order.clone());
                        }
                    }
                }
                UiEvent::OrdersLoadFailed(message) => {
                    self.list_loading = false;
                    self.list_error = Some(message);
                }
                UiEvent::OrderGenerated { order_uid, order } => {
                    self.generate_in_flight = false;
                    self.notify(
                        NotificationKind::Success,
                        format!("Order created: {order_uid}"),
                    );
                    if !self.orders.is_empty() {
                        self.list_loading = dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::LoadAllOrders,
                            &mut self.status,
                        );
                    }
                    if let Some(order) = order {
                        self.selected_uid = Some(order.order_uid.clone());
                        self.list_detail = DetailPane::ready(*order);
                    }
                }
                UiEvent::OrderGenerationFailed(message) => {
                    self.generate_in_flight = false;
                    self.notify(
                        NotificationKind::Error,
                        format!("Failed to create order: {message}"),
                    );
                }
            }
        }
    }

    fn set_view(&mut self, view: AppView) {
        self.view = view;
        self.search_error = None;
    }

    fn submit_search(&mut self) {
        let uid = self.uid_input.trim().to_string();
        if uid.is_empty() {
            self.search_error = Some("Order UID is required".to_string());
            return;
        }
        self.search_error = None;
        if dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchOrder { uid },
            &mut self.status,
        ) {
            self.search_detail = DetailPane::Loading;
        }
    }

    fn request_load_all(&mut self) {
        self.list_loading = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::LoadAllOrders,
            &mut self.status,
        );
    }

    fn request_generate(&mut self) {
        self.generate_in_flight = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::GenerateOrder,
            &mut self.status,
        );
    }

    fn clear_list(&mut self) {
        self.orders.clear();
        self.selected_uid = None;
        self.list_detail = DetailPane::Empty;
        self.list_error = None;
    }

    fn set_auto_refresh(&mut self, enabled: bool) {
        if enabled == self.auto_refresh {
            return;
        }
        let cmd = if enabled {
            BackendCommand::StartAutoRefresh {
                every: self.refresh_interval,
            }
        } else {
            BackendCommand::StopAutoRefresh
        };
        // The checkbox must keep reflecting what the worker was actually
        // told; a dropped command leaves the toggle where it was.
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.auto_refresh = enabled;
        }
    }

    fn notify(&mut self, kind: NotificationKind, message: String) {
        self.notifications.push(Notification {
            message,
            kind,
            raised_at: Instant::now(),
        });
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("Order Watch");
                ui.separator();
                if ui
                    .selectable_label(self.view == AppView::Search, "Search by UID")
                    .clicked()
                {
                    self.set_view(AppView::Search);
                }
                if ui
                    .selectable_label(self.view == AppView::List, "All orders")
                    .clicked()
                {
                    self.set_view(AppView::List);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(&self.server_url);
                    ui.separator();
                    ui.small(&self.status);
                });
            });
            ui.add_space(4.0);
        });
    }

    fn show_search_view(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        let mut submit = false;
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.uid_input)
                    .hint_text("Order UID")
                    .desired_width(320.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            if ui.button("Search").clicked() {
                submit = true;
            }
        });
        if submit {
            self.submit_search();
        }
        if let Some(error) = &self.search_error {
            ui.colored_label(egui::Color32::LIGHT_RED, error);
        }
        ui.add_space(6.0);
        ui.separator();
        Self::detail_pane_ui(
            ui,
            &mut self.search_detail,
            "Enter an order UID to look it up.",
        );
    }

    fn show_list_view(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let load_enabled = !self.auto_refresh && !self.list_loading;
            if ui
                .add_enabled(load_enabled, egui::Button::new("Load all orders"))
                .clicked()
            {
                self.request_load_all();
            }

            let generate_label = if self.generate_in_flight {
                "Creating..."
            } else {
                "Generate order"
            };
            if ui
                .add_enabled(!self.generate_in_flight, egui::Button::new(generate_label))
                .clicked()
            {
                self.request_generate();
            }

            if ui.button("Clear").clicked() {
                self.clear_list();
            }

            let mut auto = self.auto_refresh;
            if ui
                .checkbox(
                    &mut auto,
                    format!("Auto-refresh every {}s", self.refresh_interval.as_secs()),
                )
                .changed()
            {
                self.set_auto_refresh(auto);
            }
        });
        ui.add_space(6.0);
        ui.separator();
        ui.columns(2, |columns| {
            self.show_order_rows(&mut columns[0]);
            Self::detail_pane_ui(
                &mut columns[1],
                &mut self.list_detail,
                "Select an order from the list.",
            );
        });
    }

    fn show_order_rows(&mut self, ui: &mut egui::Ui) {
        if self.list_loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.weak("Loading order list...");
            });
        }
        if let Some(error) = &self.list_error {
            ui.colored_label(egui::Color32::LIGHT_RED, error);
        }
        if self.orders.is_empty() {
            if !self.list_loading && self.list_error.is_none() {
                ui.weak("List is empty — press \"Load all orders\".");
            }
            return;
        }

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_salt("order_rows")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (idx, order) in self.orders.iter().enumerate() {
                    let selected = self.selected_uid.as_deref() == Some(order.order_uid.as_str());
                    let meta = format!(
                        "{} • {}",
                        format::opt_timestamp(order.date_created.as_ref()),
                        format::item_count(order.items.len())
                    );
                    let text = format!("{}\n{}", order.order_uid, meta);
                    if ui.selectable_label(selected, text).clicked() {
                        clicked = Some(idx);
                    }
                }
            });

        if let Some(idx) = clicked {
            let order = self.orders[idx].clone();
            self.selected_uid = Some(order.order_uid.clone());
            self.list_detail = DetailPane::ready(order);
        }
    }

    fn detail_pane_ui(ui: &mut egui::Ui, pane: &mut DetailPane, placeholder: &str) {
        match pane {
            DetailPane::Empty => {
                ui.add_space(12.0);
                ui.weak(placeholder);
            }
            DetailPane::Loading => {
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak("Loading order...");
                });
            }
            DetailPane::Failed(message) => {
                ui.add_space(12.0);
                ui.colored_label(egui::Color32::LIGHT_RED, message.as_str());
            }
            DetailPane::Ready {
                order,
                show_raw,
                copied_at,
            } => {
                egui::ScrollArea::vertical()
                    .id_salt("order_detail")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        Self::overview_card(ui, order);
                        Self::delivery_card(ui, order);
                        Self::payment_card(ui, order);
                        Self::items_card(ui, order);
                        Self::raw_json_card(ui, order, show_raw, copied_at);
                    });
            }
        }
    }

    fn kv_row(ui: &mut egui::Ui, key: &str, value: &str) {
        ui.label(egui::RichText::new(key).strong());
        ui.label(value);
        ui.end_row();
    }

    fn overview_card(ui: &mut egui::Ui, order: &Order) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Overview").strong());
            egui::Grid::new("overview_grid")
                .num_columns(2)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    Self::kv_row(ui, "Order UID", &order.order_uid);
                    Self::kv_row(
                        ui,
                        "Track number",
                        format::opt_text(order.track_number.as_deref()),
                    );
                    Self::kv_row(
                        ui,
                        "Created",
                        &format::opt_timestamp(order.date_created.as_ref()),
                    );
                    Self::kv_row(
                        ui,
                        "Customer",
                        format::opt_text(order.customer_id.as_deref()),
                    );
                    Self::kv_row(
                        ui,
                        "Delivery service",
                        format::opt_text(order.delivery_service.as_deref()),
                    );
                });
        });
    }

    fn delivery_card(ui: &mut egui::Ui, order: &Order) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Delivery").strong());
            match &order.delivery {
                Some(delivery) => {
                    egui::Grid::new("delivery_grid")
                        .num_columns(2)
                        .spacing([16.0, 4.0])
                        .show(ui, |ui| {
                            Self::kv_row(
                                ui,
                                "Recipient",
                                format::opt_text(delivery.name.as_deref()),
                            );
                            Self::kv_row(ui, "Phone", format::opt_text(delivery.phone.as_deref()));
                            Self::kv_row(ui, "Address", &format::delivery_address(delivery));
                            Self::kv_row(ui, "Email", format::opt_text(delivery.email.as_deref()));
                        });
                }
                None => {
                    ui.weak("No delivery information");
                }
            }
        });
    }

    fn payment_card(ui: &mut egui::Ui, order: &Order) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Payment").strong());
            match &order.payment {
                Some(payment) => {
                    egui::Grid::new("payment_grid")
                        .num_columns(2)
                        .spacing([16.0, 4.0])
                        .show(ui, |ui| {
                            Self::kv_row(ui, "Amount", &format::payment_amount(payment));
                            Self::kv_row(
                                ui,
                                "Provider",
                                format::opt_text(payment.provider.as_deref()),
                            );
                            Self::kv_row(
                                ui,
                                "Paid at",
                                &format::opt_timestamp(payment.payment_dt.as_ref()),
                            );
                            Self::kv_row(ui, "Bank", format::opt_text(payment.bank.as_deref()));
                            Self::kv_row(
                                ui,
                                "Delivery cost",
                                &format::opt_number(payment.delivery_cost),
                            );
                            Self::kv_row(
                                ui,
                                "Goods total",
                                &format::opt_number(payment.goods_total),
                            );
                        });
                }
                None => {
                    ui.weak("No payment information");
                }
            }
        });
    }

    fn items_card(ui: &mut egui::Ui, order: &Order) {
        ui.group(|ui| {
            ui.label(
                egui::RichText::new(format!("Items ({})", order.items.len())).strong(),
            );
            if order.items.is_empty() {
                ui.weak("No items");
                return;
            }
            egui::Grid::new("items_grid")
                .num_columns(6)
                .striped(true)
                .spacing([14.0, 4.0])
                .show(ui, |ui| {
                    for header in ["nm_id", "Name", "Brand", "Price", "Sale", "Total"] {
                        ui.label(egui::RichText::new(header).strong());
                    }
                    ui.end_row();
                    for item in &order.items {
                        ui.label(item.nm_id.map(|v| v.to_string()).unwrap_or_default());
                        ui.label(format::opt_text(item.name.as_deref()));
                        ui.label(format::opt_text(item.brand.as_deref()));
                        ui.label(format::opt_number(item.price));
                        ui.label(item.sale.map(|v| format!("{v}%")).unwrap_or_default());
                        ui.label(format::opt_number(item.total_price));
                        ui.end_row();
                    }
                });
        });
    }

    fn raw_json_card(
        ui: &mut egui::Ui,
        order: &Order,
        show_raw: &mut bool,
        copied_at: &mut Option<Instant>,
    ) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Raw JSON").strong());
            ui.horizontal(|ui| {
                if ui.button("Copy JSON").clicked() {
                    if let Ok(pretty) = serde_json::to_string_pretty(order) {
                        ui.ctx().copy_text(pretty);
                        *copied_at = Some(Instant::now());
                    }
                }
                if ui
                    .button(if *show_raw { "Hide" } else { "Show" })
                    .clicked()
                {
                    *show_raw = !*show_raw;
                }
                if copied_at.is_some_and(|at| at.elapsed() < COPY_FEEDBACK_TTL) {
                    ui.weak("Copied!");
                }
            });
            if *show_raw {
                let pretty = serde_json::to_string_pretty(order)
                    .unwrap_or_else(|err| format!("serialization failed: {err}"));
                ui.label(egui::RichText::new(pretty).monospace());
            }
        });
    }

    fn show_notifications(&mut self, ctx: &egui::Context) {
        self.notifications
            .retain(|n| n.raised_at.elapsed() < NOTIFICATION_TTL);
        if self.notifications.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("notifications"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 42.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.set_max_width(380.0);
                for (idx, notification) in self.notifications.iter().enumerate() {
                    let (fill, stroke) = match notification.kind {
                        NotificationKind::Success => (
                            egui::Color32::from_rgb(46, 92, 53),
                            egui::Color32::from_rgb(96, 160, 105),
                        ),
                        NotificationKind::Error => (
                            egui::Color32::from_rgb(111, 53, 53),
                            egui::Color32::from_rgb(175, 96, 96),
                        ),
                    };
                    egui::Frame::NONE
                        .fill(fill)
                        .stroke(egui::Stroke::new(1.0, stroke))
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(10, 8))
                        .show(ui, |ui| {
                            ui.horizontal_wrapped(|ui| {
                                ui.label(
                                    egui::RichText::new(&notification.message)
                                        .color(egui::Color32::WHITE),
                                );
                                if ui.small_button("✕").clicked() {
                                    dismissed = Some(idx);
                                }
                            });
                        });
                    ui.add_space(6.0);
                }
            });
        if let Some(idx) = dismissed {
            self.notifications.remove(idx);
        }
    }
}

impl eframe::App for OrderWatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_top_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            AppView::Search => self.show_search_view(ui),
            AppView::List => self.show_list_view(ui),
        });
        self.show_notifications(ctx);

        // The backend pushes events at its own pace; poll the channel on a
        // short cadence even when no input arrives.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn order(uid: &str) -> Order {
        serde_json::from_value(serde_json::json!({ "order_uid": uid })).expect("order")
    }

    fn order_with_track(uid: &str, track: &str) -> Order {
        serde_json::from_value(serde_json::json!({ "order_uid": uid, "track_number": track }))
            .expect("order")
    }

    fn test_app() -> (
        OrderWatchApp,
        Receiver<BackendCommand>,
        Sender<UiEvent>,
    ) {
        test_app_with_queue(8)
    }

    fn test_app_with_queue(
        capacity: usize,
    ) -> (
        OrderWatchApp,
        Receiver<BackendCommand>,
        Sender<UiEvent>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(capacity);
        let (ui_tx, ui_rx) = bounded(8);
        let app = OrderWatchApp::new(
            cmd_tx,
            ui_rx,
            "http://localhost:8080".to_string(),
            Duration::from_secs(30),
        );
        (app, cmd_rx, ui_tx)
    }

    fn ready_uid(pane: &DetailPane) -> Option<&str> {
        match pane {
            DetailPane::Ready { order, .. } => Some(order.order_uid.as_str()),
            _ => None,
        }
    }

    #[test]
    fn blank_uid_shows_validation_error_and_queues_nothing() {
        let (mut app, cmd_rx, _ui_tx) = test_app();
        app.uid_input = "   ".to_string();
        app.submit_search();

        assert!(cmd_rx.try_recv().is_err(), "no command should be queued");
        assert_eq!(app.search_error.as_deref(), Some("Order UID is required"));
        assert!(matches!(app.search_detail, DetailPane::Empty));
    }

    #[test]
    fn trimmed_uid_queues_a_fetch_and_shows_loading() {
        let (mut app, cmd_rx, _ui_tx) = test_app();
        app.uid_input = "  abc123  ".to_string();
        app.submit_search();

        match cmd_rx.try_recv() {
            Ok(BackendCommand::FetchOrder { uid }) => assert_eq!(uid, "abc123"),
            other => panic!("expected FetchOrder, got {other:?}"),
        }
        assert!(app.search_error.is_none());
        assert!(matches!(app.search_detail, DetailPane::Loading));
    }

    #[test]
    fn switching_views_clears_the_search_error() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.search_error = Some("Order UID is required".to_string());
        app.set_view(AppView::List);
        assert!(app.search_error.is_none());
    }

    #[test]
    fn list_fetch_replaces_the_cache_in_response_order() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        app.orders = vec![order("stale-1"), order("stale-2"), order("stale-3")];

        ui_tx
            .send(UiEvent::OrdersLoaded(vec![order("uid-b"), order("uid-a")]))
            .expect("send");
        app.process_ui_events();

        let uids: Vec<&str> = app.orders.iter().map(|o| o.order_uid.as_str()).collect();
        assert_eq!(uids, ["uid-b", "uid-a"]);
        assert!(!app.list_loading);
    }

    #[test]
    fn surviving_selection_is_rerendered_from_fresh_data() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        app.selected_uid = Some("uid-a".to_string());
        app.list_detail = DetailPane::ready(order_with_track("uid-a", "OLD"));

        ui_tx
            .send(UiEvent::OrdersLoaded(vec![order_with_track("uid-a", "NEW")]))
            .expect("send");
        app.process_ui_events();

        match &app.list_detail {
            DetailPane::Ready { order, .. } => {
                assert_eq!(order.track_number.as_deref(), Some("NEW"));
            }
            _ => panic!("expected ready detail"),
        }
    }

    #[test]
    fn vanished_selection_leaves_the_detail_unchanged() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        app.selected_uid = Some("uid-gone".to_string());
        app.list_detail = DetailPane::ready(order_with_track("uid-gone", "KEPT"));

        ui_tx
            .send(UiEvent::OrdersLoaded(vec![order("uid-other")]))
            .expect("send");
        app.process_ui_events();

        assert_eq!(app.selected_uid.as_deref(), Some("uid-gone"));
        match &app.list_detail {
            DetailPane::Ready { order, .. } => {
                assert_eq!(order.order_uid, "uid-gone");
                assert_eq!(order.track_number.as_deref(), Some("KEPT"));
            }
            _ => panic!("expected the stale detail to remain"),
        }
    }

    #[test]
    fn generated_order_refreshes_only_an_already_loaded_list() {
        let (mut app, cmd_rx, ui_tx) = test_app();

        // Empty cache: no refresh, but the new order is selected and shown.
        ui_tx
            .send(UiEvent::OrderGenerated {
                order_uid: "order_1".to_string(),
                order: Some(Box::new(order("order_1"))),
            })
            .expect("send");
        app.process_ui_events();
        assert!(cmd_rx.try_recv().is_err(), "no refresh for an empty cache");
        assert_eq!(app.selected_uid.as_deref(), Some("order_1"));
        assert_eq!(ready_uid(&app.list_detail), Some("order_1"));
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].kind, NotificationKind::Success);

        // Loaded cache: the list is refreshed.
        app.orders = vec![order("existing")];
        ui_tx
            .send(UiEvent::OrderGenerated {
                order_uid: "order_2".to_string(),
                order: None,
            })
            .expect("send");
        app.process_ui_events();
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::LoadAllOrders)));
    }

    #[test]
    fn generation_failure_raises_an_error_notification() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        app.generate_in_flight = true;

        ui_tx
            .send(UiEvent::OrderGenerationFailed(
                "fake data generator offline".to_string(),
            ))
            .expect("send");
        app.process_ui_events();

        assert!(!app.generate_in_flight);
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].kind, NotificationKind::Error);
        assert!(app.notifications[0]
            .message
            .contains("fake data generator offline"));
    }

    #[test]
    fn auto_refresh_toggle_queues_start_then_stop() {
        let (mut app, cmd_rx, _ui_tx) = test_app();

        app.set_auto_refresh(true);
        assert!(app.auto_refresh);
        match cmd_rx.try_recv() {
            Ok(BackendCommand::StartAutoRefresh { every }) => {
                assert_eq!(every, Duration::from_secs(30));
            }
            _ => panic!("expected StartAutoRefresh"),
        }

        // Re-enabling is a no-op; no duplicate start is queued.
        app.set_auto_refresh(true);
        assert!(cmd_rx.try_recv().is_err());

        app.set_auto_refresh(false);
        assert!(!app.auto_refresh);
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::StopAutoRefresh)));
    }

    #[test]
    fn full_queue_rolls_back_in_flight_state() {
        // Zero-capacity channel with no receiver ready: every try_send
        // reports Full, so no command ever reaches the worker and no event
        // will come back to reset the flags.
        let (mut app, _cmd_rx, _ui_tx) = test_app_with_queue(0);

        app.request_generate();
        assert!(!app.generate_in_flight, "generate button must stay usable");
        assert_eq!(app.status, "Command queue is full; please retry");

        app.request_load_all();
        assert!(!app.list_loading, "load button must stay usable");

        app.uid_input = "abc123".to_string();
        app.submit_search();
        assert!(
            matches!(app.search_detail, DetailPane::Empty),
            "a search that was never queued must not show a spinner"
        );

        app.set_auto_refresh(true);
        assert!(!app.auto_refresh, "no timer was started");
    }

    #[test]
    fn disconnected_worker_rolls_back_in_flight_state() {
        let (mut app, cmd_rx, _ui_tx) = test_app();
        drop(cmd_rx);

        app.request_generate();
        assert!(!app.generate_in_flight);
        app.request_load_all();
        assert!(!app.list_loading);
        assert!(app.status.contains("disconnected"));
    }

    #[test]
    fn clear_resets_cache_selection_and_detail() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.orders = vec![order("uid-a")];
        app.selected_uid = Some("uid-a".to_string());
        app.list_detail = DetailPane::ready(order("uid-a"));
        app.list_error = Some("old failure".to_string());

        app.clear_list();

        assert!(app.orders.is_empty());
        assert!(app.selected_uid.is_none());
        assert!(matches!(app.list_detail, DetailPane::Empty));
        assert!(app.list_error.is_none());
    }

    #[test]
    fn lookup_failure_replaces_the_search_detail() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        app.search_detail = DetailPane::Loading;

        ui_tx
            .send(UiEvent::OrderLookupFailed("HTTP 404 Not Found: {}".to_string()))
            .expect("send");
        app.process_ui_events();

        match &app.search_detail {
            DetailPane::Failed(message) => assert!(message.contains("404")),
            _ => panic!("expected failed detail"),
        }
    }

    #[test]
    fn notifications_expire_after_their_ttl() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.notifications.push(Notification {
            message: "old".to_string(),
            kind: NotificationKind::Success,
            raised_at: Instant::now() - NOTIFICATION_TTL - Duration::from_secs(1),
        });
        app.notifications.push(Notification {
            message: "fresh".to_string(),
            kind: NotificationKind::Success,
            raised_at: Instant::now(),
        });

        app.notifications
            .retain(|n| n.raised_at.elapsed() < NOTIFICATION_TTL);

        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].message, "fresh");
    }
}
