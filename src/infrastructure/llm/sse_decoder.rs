/// Incremental decoder for `text/event-stream` bodies.
///
/// Network chunks do not line up with frame boundaries, so bytes are
/// buffered until a blank line closes a frame. Only `data:` fields are
/// surfaced; comments, `event:`, `id:` and `retry:` lines are skipped.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds raw bytes and returns the data payload of every frame they close.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer
            .extend(bytes.iter().copied().filter(|b| *b != b'\r'));

        let mut payloads = Vec::new();
        while let Some(pos) = find_frame_end(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..pos + 2).collect();
            if let Some(data) = frame_data(&frame[..pos]) {
                payloads.push(data);
            }
        }
        payloads
    }

    /// Flushes a trailing frame left unterminated when the body ended.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        frame_data(&rest)
    }
}

fn find_frame_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\n\n")
}

fn frame_data(frame: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(frame);
    let data_lines: Vec<&str> = text
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|value| value.strip_prefix(' ').unwrap_or(value))
        .collect();

    if data_lines.is_empty() {
        return None;
    }

    let data = data_lines.join("\n");
    if data.is_empty() { None } else { Some(data) }
}
