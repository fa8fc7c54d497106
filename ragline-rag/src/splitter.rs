/// Splits document text into overlapping windows, preferring sentence
/// boundaries and falling back to hard character windows when a single
/// sentence exceeds the chunk size.
///
/// Chunk size and overlap are measured in characters. Every chunk is a
/// contiguous substring of the input; consecutive chunks overlap by the
/// configured amount, rounded down to a sentence boundary when one fits and
/// clamped so the next sentence still fits the chunk. Output is
/// deterministic, chunks are never empty, and the chunks union-cover the
/// input text.
#[derive(Clone, Debug)]
pub struct SentenceSplitter {
    chunk_size: usize,
    overlap: usize,
}

impl SentenceSplitter {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        // Overlap must leave room for forward progress.
        let overlap = overlap.min(chunk_size.saturating_sub(1));
        Self {
            chunk_size,
            overlap,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        if self.chunk_size == 0 || text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let pieces = self.pieces(&chars);

        let mut chunks = Vec::new();
        let (mut start, mut end) = pieces[0];
        for &(_, piece_end) in &pieces[1..] {
            if piece_end.saturating_sub(start) <= self.chunk_size {
                end = piece_end;
                continue;
            }
            chunks.push(chars[start..end].iter().collect());
            start = self.reopen_at(&pieces, start, end, piece_end);
            end = piece_end;
        }
        chunks.push(chars[start..end].iter().collect());
        chunks
    }

    /// Sentence spans, with any sentence longer than the chunk size broken
    /// into overlapping hard character windows.
    fn pieces(&self, chars: &[char]) -> Vec<(usize, usize)> {
        let step = (self.chunk_size - self.overlap).max(1);
        let mut pieces = Vec::new();
        for (s, e) in sentence_spans(chars) {
            if e - s <= self.chunk_size {
                pieces.push((s, e));
                continue;
            }
            let mut window_start = s;
            loop {
                let window_end = usize::min(window_start + self.chunk_size, e);
                pieces.push((window_start, window_end));
                if window_end == e {
                    break;
                }
                window_start += step;
            }
        }
        pieces
    }

    /// Start offset of the chunk re-opened after a flush. Prefers the
    /// earliest piece boundary within the overlap budget; when no boundary
    /// fits (the trailing sentence is longer than the overlap) it falls
    /// back to a plain character offset. Clamped so the piece that forced
    /// the flush still fits the new chunk.
    fn reopen_at(
        &self,
        pieces: &[(usize, usize)],
        prev_start: usize,
        prev_end: usize,
        piece_end: usize,
    ) -> usize {
        let floor = usize::max(
            prev_end.saturating_sub(self.overlap),
            piece_end.saturating_sub(self.chunk_size),
        );
        pieces
            .iter()
            .map(|&(piece_start, _)| piece_start)
            .filter(|&ps| ps >= floor && ps > prev_start && ps < prev_end)
            .min()
            .unwrap_or(floor)
    }
}

/// Segments text into sentence spans over char offsets, each span keeping
/// its trailing whitespace so the spans tile the input exactly.
fn sentence_spans(chars: &[char]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    while i < chars.len() {
        if matches!(chars[i], '.' | '!' | '?' | '\n') {
            let mut end = i + 1;
            while end < chars.len() && chars[end].is_whitespace() {
                end += 1;
            }
            out.push((start, end));
            start = end;
            i = end;
        } else {
            i += 1;
        }
    }
    if start < chars.len() {
        out.push((start, chars.len()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::sentence_spans;

    #[test]
    fn sentence_spans_tile_the_input() {
        let chars: Vec<char> = "One sentence. Another one! A third?\nAnd a trailing fragment"
            .chars()
            .collect();
        let spans = sentence_spans(&chars);
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0].0, 0);
        assert_eq!(spans.last().unwrap().1, chars.len());
        for pair in spans.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn unterminated_text_is_one_sentence() {
        let chars: Vec<char> = "no terminator here".chars().collect();
        assert_eq!(sentence_spans(&chars), vec![(0, chars.len())]);
    }
}
