//! Attendance scanner: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering, and helpers.
//!
//! Responsibilities
//! - Re-export `Msg`, `AttendanceScannerProps` and `AttendanceScanner`.
//! - Provide the `Component` implementation that delegates to `update::update`
//!   and `view::view`.
//! - On first render, mark the scanner target as mounted, resolve the device
//!   identity and request the first location fix.
//! - On destroy, release the camera by tearing the workflow down.

use yew::platform::spawn_local;
use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::AttendanceScannerProps;
pub use state::AttendanceScanner;

impl Component for AttendanceScanner {
    type Message = Msg;
    type Properties = AttendanceScannerProps;

    fn create(ctx: &Context<Self>) -> Self {
        AttendanceScanner::new(ctx)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            if self.reader_ref.get().is_some() {
                self.workflow.mark_target_ready();
            }

            let session = self.session();
            let link = ctx.link().clone();
            spawn_local(async move {
                let fingerprint = session.identity().resolve().await;
                link.send_message(Msg::IdentityResolved(fingerprint));
            });

            let session = self.session();
            spawn_local(async move {
                session.location().refresh().await;
            });
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        let workflow = self.workflow.clone();
        spawn_local(async move {
            workflow.teardown().await;
        });
    }
}
