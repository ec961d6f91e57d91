/*
 *
 *  * Copyright (c) 2025 Couchbase, Inc.
 *  *
 *  * Licensed under the Apache License, Version 2.0 (the "License");
 *  * you may not use this file except in compliance with the License.
 *  * You may obtain a copy of the License at
 *  *
 *  *    http://www.apache.org/licenses/LICENSE-2.0
 *  *
 *  * Unless required by applicable law or agreed to in writing, software
 *  * distributed under the License is distributed on an "AS IS" BASIS,
 *  * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  * See the License for the specific language governing permissions and
 *  * limitations under the License.
 *
 */

use crate::memdx::error::ServerErrorKind;
use crate::service_type::ServiceType;
use crate::{analyticsx, httpx, mgmtx, queryx, searchx};
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, Error>;

/// A contextualized memdx error: the underlying protocol error plus the
/// endpoints the request was dispatched to and from, when known.
#[derive(Debug, Clone)]
pub struct MemdxError {
    source: crate::memdx::error::Error,
    dispatched_to: Option<String>,
    dispatched_from: Option<String>,
}

impl MemdxError {
    pub(crate) fn new(source: crate::memdx::error::Error) -> Self {
        Self {
            source,
            dispatched_to: None,
            dispatched_from: None,
        }
    }

    pub(crate) fn with_dispatched_to(mut self, dispatched_to: impl Into<String>) -> Self {
        self.dispatched_to = Some(dispatched_to.into());
        self
    }

    pub(crate) fn with_dispatched_from(mut self, dispatched_from: impl Into<String>) -> Self {
        self.dispatched_from = Some(dispatched_from.into());
        self
    }

    pub fn source(&self) -> &crate::memdx::error::Error {
        &self.source
    }

    pub fn dispatched_to(&self) -> Option<&str> {
        self.dispatched_to.as_deref()
    }

    pub fn dispatched_from(&self) -> Option<&str> {
        self.dispatched_from.as_deref()
    }

    pub fn kind(&self) -> &crate::memdx::error::ErrorKind {
        self.source.kind()
    }

    pub fn has_opaque(&self) -> Option<u32> {
        self.source.has_opaque()
    }

    pub fn has_server_config(&self) -> Option<Vec<u8>> {
        self.source.has_server_config()
    }

    pub fn is_dispatch_error(&self) -> bool {
        self.source.is_dispatch_error()
    }

    pub fn is_server_error_kind(&self, kind: ServerErrorKind) -> bool {
        self.source.is_server_error_kind(kind)
    }
}

impl Display for MemdxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)?;
        if let Some(to) = &self.dispatched_to {
            write!(f, ", dispatched to: {to}")?;
        }
        if let Some(from) = &self.dispatched_from {
            write!(f, ", dispatched from: {from}")?;
        }
        Ok(())
    }
}

impl StdError for MemdxError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.source)
    }
}

#[derive(Clone, Debug)]
pub struct Error {
    kind: Arc<ErrorKind>,
    retry_context: Option<Arc<str>>,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(ctx) = &self.retry_context {
            write!(f, ", retry info: {ctx}")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.kind.as_ref() {
            ErrorKind::Memdx(e) => Some(e),
            ErrorKind::Query(e) => Some(e),
            ErrorKind::Search(e) => Some(e),
            ErrorKind::Analytics(e) => Some(e),
            ErrorKind::Http(e) => Some(e),
            ErrorKind::Mgmt(e) => Some(e),
            _ => None,
        }
    }
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self {
            kind: Arc::new(kind),
            retry_context: None,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn is_memdx_error(&self) -> Option<&MemdxError> {
        match self.kind.as_ref() {
            ErrorKind::Memdx(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn set_retry_info(&mut self, info: impl Display) {
        self.retry_context = Some(info.to_string().into());
    }

    pub(crate) fn new_message_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message(msg.into()))
    }

    pub(crate) fn new_invalid_argument_error(
        msg: impl Into<String>,
        arg: impl Into<Option<String>>,
    ) -> Self {
        Self::new(ErrorKind::InvalidArgument {
            msg: msg.into(),
            arg: arg.into(),
        })
    }

    pub(crate) fn new_feature_not_available_error(
        feature: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::FeatureNotAvailable {
            feature: feature.into(),
            msg: msg.into(),
        })
    }

    pub(crate) fn new_contextual_memdx_error(e: MemdxError) -> Self {
        Self::new(ErrorKind::Memdx(e))
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    Memdx(MemdxError),
    Query(queryx::error::Error),
    Search(searchx::error::Error),
    Analytics(analyticsx::error::Error),
    Http(httpx::error::Error),
    Mgmt(mgmtx::error::Error),

    #[non_exhaustive]
    InvalidArgument {
        msg: String,
        arg: Option<String>,
    },
    #[non_exhaustive]
    FeatureNotAvailable {
        feature: String,
        msg: String,
    },
    #[non_exhaustive]
    ServiceNotAvailable {
        service: ServiceType,
    },
    #[non_exhaustive]
    EndpointNotKnown {
        endpoint: String,
    },
    NoEndpointsAvailable,
    NoBucket,
    NoVbucketMap,
    InvalidVbucketMap,
    #[non_exhaustive]
    NoServerAssigned {
        requested_vb_id: u16,
    },
    #[non_exhaustive]
    Compression {
        msg: String,
    },
    Shutdown,
    Message(String),
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Memdx(e) => write!(f, "memdx error: {e}"),
            ErrorKind::Query(e) => write!(f, "query error: {e}"),
            ErrorKind::Search(e) => write!(f, "search error: {e}"),
            ErrorKind::Analytics(e) => write!(f, "analytics error: {e}"),
            ErrorKind::Http(e) => write!(f, "http error: {e}"),
            ErrorKind::Mgmt(e) => write!(f, "mgmt error: {e}"),
            ErrorKind::InvalidArgument { msg, arg } => {
                write!(f, "invalid argument: {msg}")?;
                if let Some(arg) = arg {
                    write!(f, ", arg: {arg}")?;
                }
                Ok(())
            }
            ErrorKind::FeatureNotAvailable { feature, msg } => {
                write!(f, "feature not available: {feature}: {msg}")
            }
            ErrorKind::ServiceNotAvailable { service } => {
                write!(f, "service not available: {service}")
            }
            ErrorKind::EndpointNotKnown { endpoint } => {
                write!(f, "endpoint not known: {endpoint}")
            }
            ErrorKind::NoEndpointsAvailable => write!(f, "no endpoints available"),
            ErrorKind::NoBucket => write!(f, "no bucket selected"),
            ErrorKind::NoVbucketMap => write!(f, "no vbucket map"),
            ErrorKind::InvalidVbucketMap => write!(f, "invalid vbucket map"),
            ErrorKind::NoServerAssigned { requested_vb_id } => {
                write!(f, "no server assigned for vbucket {requested_vb_id}")
            }
            ErrorKind::Compression { msg } => write!(f, "compression error: {msg}"),
            ErrorKind::Shutdown => write!(f, "shutdown"),
            ErrorKind::Message(msg) => write!(f, "{msg}"),
        }
    }
}

impl PartialEq for ErrorKind {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<queryx::error::Error> for Error {
    fn from(value: queryx::error::Error) -> Self {
        Error::new(ErrorKind::Query(value))
    }
}

impl From<searchx::error::Error> for Error {
    fn from(value: searchx::error::Error) -> Self {
        Error::new(ErrorKind::Search(value))
    }
}

impl From<analyticsx::error::Error> for Error {
    fn from(value: analyticsx::error::Error) -> Self {
        Error::new(ErrorKind::Analytics(value))
    }
}

impl From<httpx::error::Error> for Error {
    fn from(value: httpx::error::Error) -> Self {
        Error::new(ErrorKind::Http(value))
    }
}

impl From<mgmtx::error::Error> for Error {
    fn from(value: mgmtx::error::Error) -> Self {
        Error::new(ErrorKind::Mgmt(value))
    }
}
