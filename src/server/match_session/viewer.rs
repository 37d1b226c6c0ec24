use actix::{Actor, ActorContext, Addr, AsyncContext, Handler, StreamHandler};
use actix_web::{HttpRequest, HttpResponse, web, Error};
use actix_web_actors::ws;
use log::warn;
use uuid::Uuid;

use crate::server::error::ws_error_message;
use crate::server::state::AppState;
use super::messages::{RegisterViewer, SnapshotUpdate, UnregisterViewer};
use super::server::MatchServer;

/// Read-only WebSocket for renderers. Receives a snapshot on connect and after
/// every change.
pub struct ViewerSession {
    pub viewer_id: Uuid,
    pub server_addr: Addr<MatchServer>,
}

impl Actor for ViewerSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.server_addr.do_send(RegisterViewer {
            viewer_id: self.viewer_id,
            addr: ctx.address(),
        });
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        self.server_addr.do_send(UnregisterViewer { viewer_id: self.viewer_id });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ViewerSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(bytes)) => ctx.pong(&bytes),
            Ok(ws::Message::Text(_)) => {
                ctx.text(ws_error_message(
                    "READ_ONLY",
                    "Viewer sockets do not accept commands.",
                    Some(&self.viewer_id.to_string()),
                ));
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("[Viewer] {} protocol error: {e}", self.viewer_id);
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl Handler<SnapshotUpdate> for ViewerSession {
    type Result = ();

    fn handle(&mut self, msg: SnapshotUpdate, ctx: &mut Self::Context) -> Self::Result {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(_) => ctx.text(ws_error_message(
                "SERIALIZATION",
                "Failed to serialize match snapshot.",
                None,
            )),
        }
    }
}

pub async fn ws_viewer(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(
        ViewerSession {
            viewer_id: Uuid::new_v4(),
            server_addr: data.match_server.clone(),
        },
        &req,
        stream,
    )
}
