use crate::config::{self, ThemeConfig};
use crate::events::AppEvent;
use crate::gui::ring;
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use ringmath::{GaugeState, Point};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub const DEFAULT_WINDOW_SIZE: i32 = 400;

pub struct AppModel {
    pub state: Rc<RefCell<GaugeState>>,
    pub theme: Rc<RefCell<ThemeConfig>>,
    pub config_path: Option<PathBuf>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Close,
    SetValue(f64),
    SetStepSize(f64),
    Pointer(Point),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::SetValue(v) => AppMsg::SetValue(v),
            AppEvent::SetStepSize(s) => AppMsg::SetStepSize(s),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

pub struct AppInit {
    pub state: GaugeState,
    pub theme: ThemeConfig,
    pub config_path: Option<PathBuf>,
    pub events: async_channel::Receiver<AppEvent>,
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Percent Ring"),
            set_default_width: DEFAULT_WINDOW_SIZE,
            set_default_height: DEFAULT_WINDOW_SIZE,
            add_css_class: "percent-ring-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "percent-ring-drawing-area",

                add_controller = gtk::GestureClick {
                    connect_pressed[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Pointer(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::Pointer(Point::new(x + dx, y + dy)));
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            state,
            theme,
            config_path,
            events,
        } = init;

        theme::load_css();

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            theme: Rc::new(RefCell::new(theme)),
            config_path,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.update_cursor();

        let state_draw = model.state.clone();
        let theme_draw = model.theme.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context, &theme_draw.borrow());
                if let Err(e) = ring::draw(
                    cr,
                    &state_draw.borrow(),
                    &colors,
                    f64::from(width),
                    f64::from(height),
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Close => self.root.close(),
            AppMsg::SetValue(value) => {
                if self.state.borrow_mut().set_value(value) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::SetStepSize(step) => {
                self.state.borrow_mut().set_step_size(step);
                self.drawing_area.queue_draw();
            }
            AppMsg::Pointer(point) => {
                let (width, height) = (
                    f64::from(self.drawing_area.width()),
                    f64::from(self.drawing_area.height()),
                );
                match self
                    .state
                    .borrow_mut()
                    .set_value_from_point(point, width, height)
                {
                    Ok(Some(value)) => {
                        log::debug!("Pointer set value to {}", value);
                        self.drawing_area.queue_draw();
                    }
                    Ok(None) => {}
                    Err(e) => log::trace!("{}", e),
                }
            }
            AppMsg::ConfigReload => {
                let result = match &self.config_path {
                    Some(path) => config::load_config_from(path),
                    None => config::load_config(),
                };
                match result {
                    Ok(new_config) => {
                        self.state
                            .borrow_mut()
                            .set_config(new_config.gauge.gauge_config());
                        *self.theme.borrow_mut() = new_config.theme;
                        self.update_cursor();
                        self.drawing_area.queue_draw();
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Failed to reload config: {}", e),
                }
            }
        }
    }
}

impl AppModel {
    /// Hand cursor over the ring while it accepts pointer input.
    fn update_cursor(&self) {
        let cursor = self
            .state
            .borrow()
            .is_interactive()
            .then_some("pointer");
        self.drawing_area.set_cursor_from_name(cursor);
    }
}
