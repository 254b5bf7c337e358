use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::ExecutorContext;
use crate::api::ChatRequest;
use crate::core::app::AppAction;

pub fn spawn_send(ctx: ExecutorContext, request_id: u64, request: ChatRequest) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(request_id, use_user_file = request.use_user_file, "send started");
        let action = match ctx.backend.ask(request).await {
            Ok(reply) => {
                debug!(request_id, reply_len = reply.response.len(), "send completed");
                AppAction::BotReplied {
                    request_id,
                    text: reply.response,
                }
            }
            Err(error) => {
                warn!(request_id, %error, "send failed");
                AppAction::BotFailed { request_id }
            }
        };
        ctx.dispatcher.dispatch(action);
    })
}
