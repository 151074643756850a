//! High-level Session API for the CQL thin client.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::protocol::codec::encode_value;
use crate::protocol::constants::*;
use crate::protocol::frame::FrameStream;
use crate::protocol::handshake;
use crate::protocol::message::Message;
use crate::protocol::messages::{ExecuteMessage, OptionsMessage, PrepareMessage, QueryMessage};
use crate::protocol::result::{parse_result, QueryOutcome};
use crate::protocol::types::CqlValue;
use crate::statement::PreparedStatement;
use tracing::debug;

/// Connection parameters.
#[derive(Debug, Clone)]
pub struct ConnectParams {
    /// Host name or IP literal.
    pub host: String,
    /// Port number.
    pub port: u16,
    /// Username for authentication (may be empty).
    pub username: String,
    /// Password for authentication (may be empty).
    pub password: String,
    /// Keyspace to use after startup (may be empty).
    pub keyspace: String,
    /// Number of TCP connect attempts; at least one attempt is made.
    pub connect_retries: u32,
    /// TCP connection timeout per attempt.
    pub connect_timeout: Duration,
}

impl ConnectParams {
    /// Create new connection parameters for a host with defaults.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: CQL_DEFAULT_PORT,
            username: String::new(),
            password: String::new(),
            keyspace: String::new(),
            connect_retries: 1,
            connect_timeout: Duration::from_secs(20),
        }
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the credentials sent when the server requests authentication.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set the keyspace selected after startup.
    pub fn with_keyspace(mut self, keyspace: impl Into<String>) -> Self {
        self.keyspace = keyspace.into();
        self
    }

    /// Set the number of TCP connect attempts.
    pub fn with_connect_retries(mut self, retries: u32) -> Self {
        self.connect_retries = retries;
        self
    }

    /// Set the TCP connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Parse a connection string like "host:port/keyspace".
    ///
    /// Port and keyspace are optional: "host", "host:port" and
    /// "host/keyspace" are all accepted.
    pub fn parse(conn_str: &str) -> Result<Self> {
        let (addr_part, keyspace) = match conn_str.split_once('/') {
            Some((addr, keyspace)) => (addr, keyspace),
            None => (conn_str, ""),
        };

        let parse_port = |p: &str| {
            p.parse::<u16>().map_err(|_| Error::InvalidConnectString {
                message: format!("Invalid port: {}", p),
            })
        };

        let (host, port) = if let Some(rest) = addr_part.strip_prefix('[') {
            // Bracketed IPv6 literal, optionally followed by :port.
            match rest.split_once(']') {
                Some((h, "")) => (h, CQL_DEFAULT_PORT),
                Some((h, p)) => (h, parse_port(p.trim_start_matches(':'))?),
                None => {
                    return Err(Error::InvalidConnectString {
                        message: "Unterminated '[' in host".to_string(),
                    })
                }
            }
        } else if addr_part.matches(':').count() > 1 {
            // Unbracketed IPv6 literal; no port position exists.
            (addr_part, CQL_DEFAULT_PORT)
        } else if let Some((h, p)) = addr_part.split_once(':') {
            (h, parse_port(p)?)
        } else {
            (addr_part, CQL_DEFAULT_PORT)
        };

        if host.is_empty() {
            return Err(Error::InvalidConnectString {
                message: "Empty host".to_string(),
            });
        }

        Ok(Self::new(host).with_port(port).with_keyspace(keyspace))
    }
}

/// A CQL session over a single connection.
///
/// A session owns exactly one socket and issues exactly one outstanding
/// request at a time; responses are correlated positionally on stream
/// id 0. It is not safe for concurrent use without external
/// synchronization. After an I/O or protocol failure the socket is torn
/// down and every subsequent call fails fast with `ConnectionClosed`.
pub struct Session {
    stream: Option<FrameStream>,
}

impl Session {
    /// Connect to a CQL server.
    ///
    /// # Arguments
    ///
    /// * `conn_str` - Connection string in format "host:port/keyspace"
    /// * `username` - Username for authentication (may be empty)
    /// * `password` - Password for authentication (may be empty)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cassandra_thin_rs::{Session, Result};
    ///
    /// fn main() -> Result<()> {
    ///     let mut session = Session::connect("localhost:9042/demo", "", "")?;
    ///     let outcome = session.query("SELECT * FROM users", cassandra_thin_rs::CONSISTENCY_ONE)?;
    ///     for row in outcome.rows().into_iter().flatten() {
    ///         println!("{:?}", row.get_by_name("name"));
    ///     }
    ///     session.close();
    ///     Ok(())
    /// }
    /// ```
    pub fn connect(conn_str: &str, username: &str, password: &str) -> Result<Self> {
        let params = ConnectParams::parse(conn_str)?.with_credentials(username, password);
        Self::connect_with_params(&params)
    }

    /// Connect with explicit connection parameters.
    pub fn connect_with_params(params: &ConnectParams) -> Result<Self> {
        let addr = resolve_addr(&params.host, params.port)?;
        debug!(host = %params.host, %addr, "connecting");

        let tcp = connect_tcp(params, &addr)?;
        tcp.set_nodelay(true)?;

        let mut stream = FrameStream::new(tcp);
        // Any startup failure drops the stream, closing the socket.
        handshake::establish(&mut stream, &params.username, &params.password)?;

        let mut session = Self {
            stream: Some(stream),
        };

        if !params.keyspace.is_empty() {
            session.use_keyspace(&params.keyspace)?;
        }

        Ok(session)
    }

    /// Whether the session still holds a live connection.
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Execute a CQL statement.
    pub fn query(&mut self, cql: &str, consistency: u16) -> Result<QueryOutcome> {
        debug!(cql, consistency, "query");
        self.request(OPCODE_QUERY, &QueryMessage { cql, consistency })
    }

    /// Prepare a CQL statement with bind markers.
    pub fn prepare(&mut self, cql: &str) -> Result<PreparedStatement> {
        debug!(cql, "prepare");
        match self.request(OPCODE_PREPARE, &PrepareMessage { cql })? {
            QueryOutcome::Prepared(stmt) => Ok(stmt),
            _ => {
                self.teardown();
                Err(Error::protocol("PREPARE did not return a Prepared result"))
            }
        }
    }

    /// Execute a prepared statement with values keyed by column name.
    ///
    /// The wire layout is positional: the prepared statement's column
    /// order is walked and each name is looked up in `values`
    /// (case-insensitive). A missing name fails with `MissingBindValue`
    /// without sending anything; the session stays usable.
    pub fn execute(
        &mut self,
        stmt: &PreparedStatement,
        values: &HashMap<String, CqlValue>,
        consistency: u16,
    ) -> Result<QueryOutcome> {
        let mut encoded = Vec::with_capacity(stmt.column_count());
        for column in stmt.columns() {
            let value = lookup(values, &column.name).ok_or_else(|| Error::MissingBindValue {
                name: column.name.clone(),
            })?;
            encoded.push(encode_value(value, &column.data_type)?);
        }
        self.execute_encoded(stmt, encoded, consistency)
    }

    /// Execute a prepared statement with values in declared column order.
    pub fn execute_positional(
        &mut self,
        stmt: &PreparedStatement,
        values: &[CqlValue],
        consistency: u16,
    ) -> Result<QueryOutcome> {
        if values.len() != stmt.column_count() {
            let name = stmt
                .columns()
                .get(values.len())
                .map(|c| c.name.clone())
                .unwrap_or_else(|| format!("#{}", stmt.column_count()));
            return Err(Error::MissingBindValue { name });
        }
        let mut encoded = Vec::with_capacity(values.len());
        for (value, column) in values.iter().zip(stmt.columns()) {
            encoded.push(encode_value(value, &column.data_type)?);
        }
        self.execute_encoded(stmt, encoded, consistency)
    }

    fn execute_encoded(
        &mut self,
        stmt: &PreparedStatement,
        values: Vec<Option<Vec<u8>>>,
        consistency: u16,
    ) -> Result<QueryOutcome> {
        debug!(values = values.len(), consistency, "execute");
        self.request(
            OPCODE_EXECUTE,
            &ExecuteMessage {
                id: stmt.id(),
                values: &values,
                consistency,
            },
        )
    }

    /// Query the startup options the server supports.
    pub fn options(&mut self) -> Result<HashMap<String, Vec<String>>> {
        let stream = self.stream.as_mut().ok_or(Error::ConnectionClosed)?;
        let outcome = (|| {
            stream.send_message(OPCODE_OPTIONS, &OptionsMessage)?;
            let frame = stream.read_frame()?;
            if frame.opcode != OPCODE_SUPPORTED {
                return Err(Error::UnexpectedOpcode {
                    expected: OPCODE_SUPPORTED,
                    actual: frame.opcode,
                });
            }
            let mut buf = crate::protocol::buffer::ReadBuffer::new(frame.body);
            Ok(buf.read_string_multimap()?.into_iter().collect())
        })();
        if outcome.is_err() {
            self.teardown();
        }
        outcome
    }

    /// Close the session. Idempotent; tolerates a prior failure.
    pub fn close(&mut self) {
        self.teardown();
    }

    /// Switch keyspace via the QUERY path and verify the echo.
    fn use_keyspace(&mut self, keyspace: &str) -> Result<()> {
        let cql = format!("USE {}", keyspace);
        match self.query(&cql, CONSISTENCY_ALL)? {
            QueryOutcome::SetKeyspace(actual) if actual.eq_ignore_ascii_case(keyspace) => Ok(()),
            QueryOutcome::SetKeyspace(actual) => {
                self.teardown();
                Err(Error::KeyspaceMismatch {
                    requested: keyspace.to_string(),
                    actual,
                })
            }
            _ => {
                self.teardown();
                Err(Error::protocol("USE did not return a SetKeyspace result"))
            }
        }
    }

    /// Send one request frame and interpret the RESULT reply. Any failure
    /// tears the connection down; later calls fail fast.
    fn request<M: Message>(&mut self, opcode: u8, msg: &M) -> Result<QueryOutcome> {
        let stream = self.stream.as_mut().ok_or(Error::ConnectionClosed)?;
        let outcome = exchange(stream, opcode, msg);
        if outcome.is_err() {
            self.teardown();
        }
        outcome
    }

    fn teardown(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.shutdown();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn exchange<M: Message>(stream: &mut FrameStream, opcode: u8, msg: &M) -> Result<QueryOutcome> {
    stream.send_message(opcode, msg)?;
    let frame = stream.read_frame()?;
    if frame.opcode != OPCODE_RESULT {
        return Err(Error::UnexpectedOpcode {
            expected: OPCODE_RESULT,
            actual: frame.opcode,
        });
    }
    parse_result(frame.body)
}

/// Look up a bind value by name, falling back to a case-insensitive scan.
fn lookup<'a>(values: &'a HashMap<String, CqlValue>, name: &str) -> Option<&'a CqlValue> {
    values.get(name).or_else(|| {
        values
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

/// Resolve a host to a socket address.
///
/// An IP literal is used directly (AF_INET6 iff it is an IPv6 literal);
/// otherwise a DNS lookup is performed, preferring IPv4 addresses.
fn resolve_addr(host: &str, port: u16) -> Result<SocketAddr> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, port));
    }

    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|e| Error::DnsResolutionFailed {
            hostname: host.to_string(),
            message: e.to_string(),
        })?
        .collect();

    addrs
        .iter()
        .find(|a| a.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| Error::DnsResolutionFailed {
            hostname: host.to_string(),
            message: "no addresses returned".to_string(),
        })
}

/// Open the TCP connection, honoring the retry count (at least one
/// attempt) and per-attempt timeout.
fn connect_tcp(params: &ConnectParams, addr: &SocketAddr) -> Result<TcpStream> {
    let attempts = params.connect_retries.max(1);
    let mut last_err: Option<std::io::Error> = None;

    for attempt in 1..=attempts {
        match TcpStream::connect_timeout(addr, params.connect_timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(attempt, attempts, error = %e, "connect attempt failed");
                last_err = Some(e);
            }
        }
    }

    let err = last_err.expect("at least one connect attempt");
    if err.kind() == std::io::ErrorKind::TimedOut || err.kind() == std::io::ErrorKind::WouldBlock {
        Err(Error::ConnectionTimeout {
            host: params.host.clone(),
            port: params.port,
            timeout: params.connect_timeout,
        })
    } else {
        Err(Error::Io(err))
    }
}
