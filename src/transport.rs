// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Modbus-TCP transport.
//!
//! [`Connection`] owns the socket and runs strict request/response
//! pairing: exactly one transaction is in flight at a time, responses
//! are matched by transaction identifier, and every failure (timeout,
//! transport loss, undecodable response) tears the socket down so a
//! stale response can never be consumed by a later transaction. The
//! socket is recreated lazily by the next operation.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::ClientConfig;
use crate::error::{ConnectionError, ProtocolError};
use crate::protocol::frame::{self, MbapHeader, MBAP_HEADER_LEN};
use crate::protocol::pdu;

/// A lazily connected Modbus-TCP link to one unit.
///
/// Not internally synchronized; the client wraps it in a mutex to
/// enforce the one-in-flight-request rule across callers.
#[derive(Debug)]
pub(crate) struct Connection {
    config: ClientConfig,
    stream: Option<TcpStream>,
    next_transaction: u16,
}

impl Connection {
    /// Creates an unconnected link; the socket opens on first use.
    pub(crate) fn new(config: ClientConfig) -> Self {
        Self {
            config,
            stream: None,
            next_transaction: 0,
        }
    }

    /// Drops the socket. The next operation reconnects.
    pub(crate) fn close(&mut self) {
        if self.stream.take().is_some() {
            tracing::debug!(
                host = %self.config.host(),
                port = self.config.port(),
                "Closed connection"
            );
        }
    }

    /// Reads `count` holding registers starting at `address`.
    pub(crate) async fn read_holding_registers(
        &mut self,
        address: u16,
        count: u16,
    ) -> Result<Vec<u16>, ConnectionError> {
        let request = pdu::encode_read_holding(address, count);
        let response = self.transact(&request).await?;
        pdu::decode_read_holding(&response, count).map_err(|err| self.protocol_failure(err))
    }

    /// Writes a single holding register.
    pub(crate) async fn write_single_register(
        &mut self,
        address: u16,
        value: u16,
    ) -> Result<(), ConnectionError> {
        let request = pdu::encode_write_single(address, value);
        let response = self.transact(&request).await?;
        pdu::decode_write_single(&response, address, value)
            .map_err(|err| self.protocol_failure(err))
    }

    /// Runs one request/response transaction, bounded by the configured
    /// timeout. Any failure leaves the connection closed.
    ///
    /// The socket is moved into the exchange for its duration: a timeout
    /// or a caller dropping the future mid-transaction drops the socket
    /// with it, so a late response can never be matched to a future
    /// request.
    async fn transact(&mut self, request_pdu: &[u8]) -> Result<Vec<u8>, ConnectionError> {
        let transaction_id = self.next_transaction;
        self.next_transaction = self.next_transaction.wrapping_add(1);

        let frame = frame::encode_frame(transaction_id, self.config.unit_id(), request_pdu);
        let timeout = self.config.timeout();

        let stream = self.stream.take();
        let exchange = tokio::time::timeout(timeout, Self::exchange(&self.config, stream, &frame));
        let (stream, header, response_pdu) = match exchange.await {
            Err(_) => {
                // Safe: timeout in practical use will never exceed u64::MAX milliseconds
                #[allow(clippy::cast_possible_truncation)]
                let timeout_ms = timeout.as_millis() as u64;
                tracing::warn!(
                    host = %self.config.host(),
                    port = self.config.port(),
                    timeout_ms,
                    "Transaction timed out, closing connection"
                );
                return Err(ConnectionError::Timeout(timeout_ms));
            }
            Ok(Err(err)) => return Err(err),
            Ok(Ok(response)) => response,
        };

        if header.transaction_id != transaction_id {
            return Err(self.protocol_failure(ProtocolError::TransactionMismatch {
                sent: transaction_id,
                received: header.transaction_id,
            }));
        }

        self.stream = Some(stream);
        tracing::debug!(
            transaction_id,
            pdu_len = response_pdu.len(),
            "Completed Modbus transaction"
        );
        Ok(response_pdu)
    }

    /// Sends one frame and reads one response frame on an owned socket,
    /// connecting first if none is open. Owning the socket keeps the
    /// whole cost of an unreachable host inside the caller's timeout and
    /// makes cancellation drop the socket.
    async fn exchange(
        config: &ClientConfig,
        stream: Option<TcpStream>,
        request: &[u8],
    ) -> Result<(TcpStream, MbapHeader, Vec<u8>), ConnectionError> {
        let mut stream = match stream {
            Some(stream) => stream,
            None => {
                tracing::info!(
                    host = %config.host(),
                    port = config.port(),
                    "Connecting"
                );
                let stream = TcpStream::connect((config.host(), config.port())).await?;
                stream.set_nodelay(true)?;
                stream
            }
        };

        stream.write_all(request).await?;

        let mut header_bytes = [0u8; MBAP_HEADER_LEN];
        stream.read_exact(&mut header_bytes).await?;
        let header = MbapHeader::decode(&header_bytes).map_err(ConnectionError::Protocol)?;

        let mut response_pdu = vec![0u8; header.pdu_len()];
        stream.read_exact(&mut response_pdu).await?;

        Ok((stream, header, response_pdu))
    }

    /// Logs a protocol failure, closes the socket, and wraps the error.
    fn protocol_failure(&mut self, err: ProtocolError) -> ConnectionError {
        tracing::warn!(
            host = %self.config.host(),
            port = self.config.port(),
            error = %err,
            "Protocol error, closing connection"
        );
        self.close();
        ConnectionError::Protocol(err)
    }
}
