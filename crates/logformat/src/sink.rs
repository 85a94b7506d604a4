use serde::Serialize;

use crate::ir::{IdKind, IpKind, PortKind, Predicate, Redirect, RtimeUnit, When};

/// Returned by a sink that refuses to handle its field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, thiserror::Error)]
#[error("sink declined")]
pub struct Declined;

pub type HookResult = Result<(), Declined>;

/// Receives one call per literal byte or directive, strictly in input order.
///
/// Every method corresponds to one semantic field of a log line. The parser
/// only decides *which* method to call and with what arguments; what a field
/// means is up to the implementation. Returning `Err(Declined)` stops parsing
/// with [`ErrorKind::Hook`](crate::ErrorKind::Hook); calls already made are
/// not undone.
///
/// Borrowed names (`name`, `format`) are only valid for the duration of the call.
pub trait Sink {
    /// Literal text, `%%` and backslash escapes, one byte at a time.
    fn literal(&mut self, byte: u8) -> HookResult;

    /// `%a`, `%{c}a`, `%A`
    fn ip(&mut self, pred: &Predicate, redirect: Redirect, ip: IpKind) -> HookResult;
    /// `%B`
    fn resp_size(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%b`
    fn resp_size_clf(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%{VARNAME}C`
    fn req_cookie(&mut self, pred: &Predicate, redirect: Redirect, name: &str) -> HookResult;
    /// `%{VARNAME}e`
    fn env_var(&mut self, pred: &Predicate, redirect: Redirect, name: &str) -> HookResult;
    /// `%f`
    fn filename(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%h`
    fn remote_hostname(
        &mut self,
        pred: &Predicate,
        redirect: Redirect,
        hostname_lookups: bool,
    ) -> HookResult;
    /// `%H`
    fn req_protocol(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%{VARNAME}i`
    fn req_header(&mut self, pred: &Predicate, redirect: Redirect, name: &str) -> HookResult;
    /// `%k`
    fn keepalive_reqs(&mut self, pred: &Predicate, redirect: Redirect, keep_alive: bool)
    -> HookResult;
    /// `%l`
    fn remote_logname(
        &mut self,
        pred: &Predicate,
        redirect: Redirect,
        identity_check: bool,
    ) -> HookResult;
    /// `%L`
    fn req_logid(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%m`
    fn req_method(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%{VARNAME}n`
    fn note(&mut self, pred: &Predicate, redirect: Redirect, name: &str) -> HookResult;
    /// `%{VARNAME}o`
    fn reply_header(&mut self, pred: &Predicate, redirect: Redirect, name: &str) -> HookResult;
    /// `%p`, `%{format}p`
    fn server_port(&mut self, pred: &Predicate, redirect: Redirect, port: PortKind) -> HookResult;
    /// `%P`, `%{format}P`
    fn id(&mut self, pred: &Predicate, redirect: Redirect, id: IdKind) -> HookResult;
    /// `%q`
    fn query_string(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%r`
    fn req_first_line(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%R`
    fn resp_handler(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%s`
    fn status(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%t`, `%{format}t` with a strftime(3) pattern.
    fn time(&mut self, pred: &Predicate, redirect: Redirect, when: When, format: &str)
    -> HookResult;
    /// `%{sec}t`, `%{msec}t`, `%{usec}t`, `%{msec_frac}t`, `%{usec_frac}t`
    fn time_frac(&mut self, pred: &Predicate, redirect: Redirect, when: When, unit: RtimeUnit)
    -> HookResult;
    /// `%T`, `%{UNIT}T`, `%D`
    fn time_taken(&mut self, pred: &Predicate, redirect: Redirect, unit: RtimeUnit) -> HookResult;
    /// `%u`
    fn remote_user(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%U`
    fn url_path(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%v` (always canonical), `%V`
    fn server_name(&mut self, pred: &Predicate, redirect: Redirect, canonical: bool)
    -> HookResult;
    /// `%X`
    fn conn_status(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%I`
    fn bytes_recv(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%O`
    fn bytes_sent(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%S`
    fn bytes_xfer(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult;
    /// `%{VARNAME}^ti`
    fn req_trailer(&mut self, pred: &Predicate, redirect: Redirect, name: &str) -> HookResult;
    /// `%{VARNAME}^to`
    fn resp_trailer(&mut self, pred: &Predicate, redirect: Redirect, name: &str) -> HookResult;
}

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Absent for literals and for directives without a status list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Predicate>,
    /// Absent for literals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Redirect>,
    #[serde(flatten)]
    pub field: Field,
}

/// The sink method that was called, with its directive-specific arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Field {
    Literal { byte: u8 },
    Ip { ip: IpKind },
    RespSize,
    RespSizeClf,
    ReqCookie { name: String },
    EnvVar { name: String },
    Filename,
    RemoteHostname { hostname_lookups: bool },
    ReqProtocol,
    ReqHeader { name: String },
    KeepaliveReqs { keep_alive: bool },
    RemoteLogname { identity_check: bool },
    ReqLogid,
    ReqMethod,
    Note { name: String },
    ReplyHeader { name: String },
    ServerPort { port: PortKind },
    Id { id: IdKind },
    QueryString,
    ReqFirstLine,
    RespHandler,
    Status,
    Time { when: When, format: String },
    TimeFrac { when: When, unit: RtimeUnit },
    TimeTaken { unit: RtimeUnit },
    RemoteUser,
    UrlPath,
    ServerName { canonical: bool },
    ConnStatus,
    BytesRecv,
    BytesSent,
    BytesXfer,
    ReqTrailer { name: String },
    RespTrailer { name: String },
}

/// A [`Sink`] that keeps every call as an [`Event`].
///
/// Handy for inspecting what a format string does, or for exporting that as
/// JSON:
///
/// ```
/// use logformat::{Options, Recorder, formats};
///
/// let mut recorder = Recorder::new();
/// logformat::parse(formats::COMMON, &mut recorder, &Options::default())?;
/// assert_eq!(recorder.events().len(), 15);
/// # Ok::<(), logformat::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Vec<Event>,
    calls: usize,
    decline_at: Option<usize>,
}

impl Recorder {
    /// A recorder that accepts every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose `n`-th call (counting from zero) is declined.
    /// The declined call is not recorded.
    pub fn declining_at(n: usize) -> Self {
        Self {
            decline_at: Some(n),
            ..Self::default()
        }
    }

    /// Events recorded so far, in call order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the recorder and returns its events.
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Number of calls received, declined one included.
    pub fn calls(&self) -> usize {
        self.calls
    }

    fn push(
        &mut self,
        pred: Option<&Predicate>,
        redirect: Option<Redirect>,
        field: Field,
    ) -> HookResult {
        let call = self.calls;
        self.calls += 1;
        if self.decline_at == Some(call) {
            return Err(Declined);
        }

        let predicate = pred.filter(|p| p.is_negated() || !p.is_empty()).cloned();
        self.events.push(Event {
            predicate,
            redirect,
            field,
        });
        Ok(())
    }

    fn directive(&mut self, pred: &Predicate, redirect: Redirect, field: Field) -> HookResult {
        self.push(Some(pred), Some(redirect), field)
    }
}

impl Sink for Recorder {
    fn literal(&mut self, byte: u8) -> HookResult {
        self.push(None, None, Field::Literal { byte })
    }

    fn ip(&mut self, pred: &Predicate, redirect: Redirect, ip: IpKind) -> HookResult {
        self.directive(pred, redirect, Field::Ip { ip })
    }

    fn resp_size(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::RespSize)
    }

    fn resp_size_clf(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::RespSizeClf)
    }

    fn req_cookie(&mut self, pred: &Predicate, redirect: Redirect, name: &str) -> HookResult {
        let name = name.to_owned();
        self.directive(pred, redirect, Field::ReqCookie { name })
    }

    fn env_var(&mut self, pred: &Predicate, redirect: Redirect, name: &str) -> HookResult {
        let name = name.to_owned();
        self.directive(pred, redirect, Field::EnvVar { name })
    }

    fn filename(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::Filename)
    }

    fn remote_hostname(
        &mut self,
        pred: &Predicate,
        redirect: Redirect,
        hostname_lookups: bool,
    ) -> HookResult {
        self.directive(pred, redirect, Field::RemoteHostname { hostname_lookups })
    }

    fn req_protocol(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::ReqProtocol)
    }

    fn req_header(&mut self, pred: &Predicate, redirect: Redirect, name: &str) -> HookResult {
        let name = name.to_owned();
        self.directive(pred, redirect, Field::ReqHeader { name })
    }

    fn keepalive_reqs(&mut self, pred: &Predicate, redirect: Redirect, keep_alive: bool)
    -> HookResult {
        self.directive(pred, redirect, Field::KeepaliveReqs { keep_alive })
    }

    fn remote_logname(
        &mut self,
        pred: &Predicate,
        redirect: Redirect,
        identity_check: bool,
    ) -> HookResult {
        self.directive(pred, redirect, Field::RemoteLogname { identity_check })
    }

    fn req_logid(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::ReqLogid)
    }

    fn req_method(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::ReqMethod)
    }

    fn note(&mut self, pred: &Predicate, redirect: Redirect, name: &str) -> HookResult {
        let name = name.to_owned();
        self.directive(pred, redirect, Field::Note { name })
    }

    fn reply_header(&mut self, pred: &Predicate, redirect: Redirect, name: &str) -> HookResult {
        let name = name.to_owned();
        self.directive(pred, redirect, Field::ReplyHeader { name })
    }

    fn server_port(&mut self, pred: &Predicate, redirect: Redirect, port: PortKind) -> HookResult {
        self.directive(pred, redirect, Field::ServerPort { port })
    }

    fn id(&mut self, pred: &Predicate, redirect: Redirect, id: IdKind) -> HookResult {
        self.directive(pred, redirect, Field::Id { id })
    }

    fn query_string(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::QueryString)
    }

    fn req_first_line(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::ReqFirstLine)
    }

    fn resp_handler(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::RespHandler)
    }

    fn status(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::Status)
    }

    fn time(&mut self, pred: &Predicate, redirect: Redirect, when: When, format: &str)
    -> HookResult {
        let format = format.to_owned();
        self.directive(pred, redirect, Field::Time { when, format })
    }

    fn time_frac(&mut self, pred: &Predicate, redirect: Redirect, when: When, unit: RtimeUnit)
    -> HookResult {
        self.directive(pred, redirect, Field::TimeFrac { when, unit })
    }

    fn time_taken(&mut self, pred: &Predicate, redirect: Redirect, unit: RtimeUnit) -> HookResult {
        self.directive(pred, redirect, Field::TimeTaken { unit })
    }

    fn remote_user(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::RemoteUser)
    }

    fn url_path(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::UrlPath)
    }

    fn server_name(&mut self, pred: &Predicate, redirect: Redirect, canonical: bool)
    -> HookResult {
        self.directive(pred, redirect, Field::ServerName { canonical })
    }

    fn conn_status(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::ConnStatus)
    }

    fn bytes_recv(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::BytesRecv)
    }

    fn bytes_sent(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::BytesSent)
    }

    fn bytes_xfer(&mut self, pred: &Predicate, redirect: Redirect) -> HookResult {
        self.directive(pred, redirect, Field::BytesXfer)
    }

    fn req_trailer(&mut self, pred: &Predicate, redirect: Redirect, name: &str) -> HookResult {
        let name = name.to_owned();
        self.directive(pred, redirect, Field::ReqTrailer { name })
    }

    fn resp_trailer(&mut self, pred: &Predicate, redirect: Redirect, name: &str) -> HookResult {
        let name = name.to_owned();
        self.directive(pred, redirect, Field::RespTrailer { name })
    }
}
