/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

//! Request/response exchanges with per-request timers.
//!
//! A request carries a monotonically increasing id and an imaginary reply
//! address. The imaginary address is synthesized once per response type and
//! cached, so every guarded response of that type lands in a single
//! dispatch slot; this keeps dispatch cheap and separates timeout-guarded
//! replies from untracked ones. For each request id at most one of the real
//! response and the timeout is delivered.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::common::types::RequestId;
use crate::common::{AddressPtr, Supervisor};
use crate::message::{ErrorCode, Message};
use crate::traits::RequestPayload;

/// A request payload in flight: the caller's payload plus the id and the
/// imaginary reply address the response has to be sent to.
#[derive(Debug)]
pub struct Request<M: RequestPayload> {
    pub(crate) id: RequestId,
    pub(crate) reply_to: AddressPtr,
    payload: Arc<M>,
}

impl<M: RequestPayload> Request<M> {
    pub(crate) fn new(id: RequestId, reply_to: AddressPtr, payload: M) -> Self {
        Request {
            id,
            reply_to,
            payload: Arc::new(payload),
        }
    }

    /// The request id, unique per requesting supervisor.
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// The caller's payload.
    pub fn payload(&self) -> &M {
        &self.payload
    }
}

impl<M: RequestPayload> Clone for Request<M> {
    fn clone(&self) -> Self {
        Request {
            id: self.id,
            reply_to: self.reply_to.clone(),
            payload: Arc::clone(&self.payload),
        }
    }
}

/// The answer to a [`Request`]: either the destination's payload or an
/// error, never both.
#[derive(Debug)]
pub struct Response<M: RequestPayload> {
    pub(crate) request: Request<M>,
    error: Option<ErrorCode>,
    payload: Option<Arc<M::Response>>,
}

impl<M: RequestPayload> Response<M> {
    pub(crate) fn ok(request: &Request<M>, payload: M::Response) -> Self {
        Response {
            request: request.clone(),
            error: None,
            payload: Some(Arc::new(payload)),
        }
    }

    pub(crate) fn timed_out(request: &Request<M>) -> Self {
        Response {
            request: request.clone(),
            error: Some(ErrorCode::RequestTimeout),
            payload: None,
        }
    }

    /// The original request, available to correlate and to recover the
    /// request payload on timeout.
    pub fn request(&self) -> &Request<M> {
        &self.request
    }

    /// The error, if the exchange failed.
    pub fn error(&self) -> Option<ErrorCode> {
        self.error
    }

    /// The response payload, absent on error.
    pub fn payload(&self) -> Option<&M::Response> {
        self.payload.as_deref()
    }
}

impl<M: RequestPayload> Clone for Response<M> {
    fn clone(&self) -> Self {
        Response {
            request: self.request.clone(),
            error: self.error,
            payload: self.payload.clone(),
        }
    }
}

/// Method identity of the per-response-type reply router a supervisor
/// installs on the imaginary address.
pub(crate) struct ReplyRoute<M>(PhantomData<M>);

/// Fluent construction of a request message. Obtained from
/// [`Context::request`](crate::prelude::Context::request); nothing is sent
/// until [`timeout`](RequestBuilder::timeout) is called.
#[must_use = "a request is only sent once a timeout is set"]
pub struct RequestBuilder<M: RequestPayload> {
    inner: Option<BuilderInner<M>>,
}

struct BuilderInner<M: RequestPayload> {
    supervisor: Arc<Supervisor>,
    dest: AddressPtr,
    reply_to: AddressPtr,
    request: Request<M>,
    install_handler: bool,
}

impl<M: RequestPayload> RequestBuilder<M> {
    pub(crate) fn new(
        supervisor: Option<Arc<Supervisor>>,
        dest: AddressPtr,
        reply_to: AddressPtr,
        payload: M,
    ) -> Self {
        let Some(supervisor) = supervisor else {
            warn!("request issued after supervisor teardown, dropped");
            return RequestBuilder { inner: None };
        };
        let id = supervisor.allocate_request_id();
        let (imaginary, install_handler) = supervisor.reply_address_for::<M>();
        RequestBuilder {
            inner: Some(BuilderInner {
                supervisor,
                dest,
                reply_to,
                request: Request::new(id, imaginary, payload),
                install_handler,
            }),
        }
    }

    /// Installs the reply route if this is the first request of this
    /// response type, records the timeout message, enqueues the request and
    /// arms a timer with the request id.
    pub fn timeout(self, timeout: Duration) {
        let Some(inner) = self.inner else {
            return;
        };
        let BuilderInner {
            supervisor,
            dest,
            reply_to,
            request,
            install_handler,
        } = inner;
        if install_handler {
            supervisor.install_reply_route::<M>(request.reply_to.clone());
        }
        let id = request.id;
        let timeout_message = Message::new(reply_to, Response::timed_out(&request));
        supervisor.register_request(id, timeout_message);
        supervisor.put(Message::new(dest, request));
        supervisor.start_timer(timeout, id);
    }
}
