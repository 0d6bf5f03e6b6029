// src/exec/streams.rs

//! Reading the child's output pipes.

use std::io;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

/// Read `reader` to EOF and decode it, replacing invalid UTF-8.
///
/// A missing pipe reads as empty.
pub(crate) async fn drain_to_string<R>(reader: Option<R>) -> io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    if let Some(mut reader) = reader {
        reader.read_to_end(&mut buf).await?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Line-at-a-time reader over one output pipe.
///
/// A line ends at `\n`, `\r` or `\r\n` (one terminator, not two), so
/// carriage-return progress updates arrive as they are written. Lines are
/// decoded lossily so a stray invalid byte doesn't end the stream. A final
/// fragment without a terminator is returned as the last line.
pub(crate) struct LineReader<R> {
    reader: Option<BufReader<R>>,
    pending: Vec<u8>,
    // The previous line ended with `\r`; a `\n` right after it belongs to
    // the same terminator.
    after_cr: bool,
}

impl<R> LineReader<R>
where
    R: AsyncRead + Unpin,
{
    pub(crate) fn new(reader: Option<R>) -> Self {
        Self {
            reader: reader.map(BufReader::new),
            pending: Vec::new(),
            after_cr: false,
        }
    }

    /// False once EOF has been reached (or there never was a pipe).
    pub(crate) fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// Next line, or `None` at EOF.
    ///
    /// Cancel safe: the only await point is `fill_buf`, and bytes are moved
    /// into `pending` and consumed without awaiting in between, so a
    /// partially read line survives a dropped call.
    pub(crate) async fn next_line(&mut self) -> io::Result<Option<String>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        loop {
            let buf = reader.fill_buf().await?;

            if buf.is_empty() {
                self.reader = None;
                if self.pending.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(self.take_line()));
            }

            let mut start = 0;
            if self.after_cr {
                self.after_cr = false;
                if buf[0] == b'\n' {
                    start = 1;
                }
            }

            match buf[start..].iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(offset) => {
                    let end = start + offset;
                    self.pending.extend_from_slice(&buf[start..end]);
                    self.after_cr = buf[end] == b'\r';
                    reader.consume(end + 1);
                    return Ok(Some(self.take_line()));
                }
                None => {
                    self.pending.extend_from_slice(&buf[start..]);
                    let len = buf.len();
                    reader.consume(len);
                }
            }
        }
    }

    /// Read and throw away everything up to EOF (or the first read error).
    pub(crate) async fn discard_to_eof(mut self) {
        let Some(mut reader) = self.reader.take() else {
            return;
        };

        loop {
            let len = match reader.fill_buf().await {
                Ok(buf) if !buf.is_empty() => buf.len(),
                _ => break,
            };
            reader.consume(len);
        }
    }

    fn take_line(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect_from<R: AsyncRead + Unpin>(input: R) -> Vec<String> {
        let mut reader = LineReader::new(Some(input));
        let mut lines = Vec::new();
        while let Some(line) = reader.next_line().await.unwrap() {
            lines.push(line);
        }
        assert!(!reader.is_open());
        lines
    }

    async fn collect_lines(input: &'static [u8]) -> Vec<String> {
        collect_from(input).await
    }

    #[tokio::test]
    async fn strips_lf_cr_and_crlf_terminators() {
        assert_eq!(collect_lines(b"a\nb\r\nc\rd\n").await, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn lone_carriage_returns_split_progress_output() {
        assert_eq!(
            collect_lines(b"10%\r20%\r30%\n").await,
            vec!["10%", "20%", "30%"]
        );
        assert_eq!(collect_lines(b"a\r\rb").await, vec!["a", "", "b"]);
    }

    #[tokio::test]
    async fn crlf_split_across_reads_is_one_terminator() {
        let input = (&b"a\r"[..]).chain(&b"\nb\n"[..]);
        assert_eq!(collect_from(input).await, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn keeps_empty_lines_and_trailing_fragment() {
        assert_eq!(collect_lines(b"first\n\nlast").await, vec!["first", "", "last"]);
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced_not_fatal() {
        assert_eq!(
            collect_lines(b"ok\n\xff\xfe\nstill ok\n").await,
            vec!["ok", "\u{fffd}\u{fffd}", "still ok"]
        );
    }

    #[tokio::test]
    async fn missing_pipe_is_closed_and_empty() {
        let mut reader: LineReader<&'static [u8]> = LineReader::new(None);
        assert!(!reader.is_open());
        assert_eq!(reader.next_line().await.unwrap(), None);
        assert_eq!(drain_to_string::<&'static [u8]>(None).await.unwrap(), "");
    }

    #[tokio::test]
    async fn discard_reads_past_a_partial_line() {
        let mut reader = LineReader::new(Some(&b"kept\npartial"[..]));
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("kept"));
        reader.discard_to_eof().await;
    }

    #[tokio::test]
    async fn drain_keeps_text_verbatim() {
        let text = drain_to_string(Some(&b"  spaced out \n\n"[..])).await.unwrap();
        assert_eq!(text, "  spaced out \n\n");
    }
}
