use ragline_rag::SentenceSplitter;

fn fifty_char_sentences(count: usize) -> String {
    // 48 filler chars + ". " = exactly 50 chars per sentence.
    format!("{}. ", "x".repeat(48)).repeat(count)
}

#[test]
fn short_text_yields_a_single_chunk() {
    let splitter = SentenceSplitter::new(1024, 512);
    let chunks = splitter.split("A short document. Two sentences only.");
    assert_eq!(chunks.len(), 1);
}

#[test]
fn fifteen_hundred_chars_yield_two_chunks() {
    let splitter = SentenceSplitter::new(1024, 512);
    let text = fifty_char_sentences(30);
    assert_eq!(text.chars().count(), 1500);

    let chunks = splitter.split(&text);
    assert_eq!(chunks.len(), 2);
    assert!(chunks.iter().all(|c| c.chars().count() <= 1024));
}

#[test]
fn consecutive_chunks_overlap_by_roughly_the_configured_amount() {
    let splitter = SentenceSplitter::new(1024, 512);
    let text = fifty_char_sentences(30);
    let chunks = splitter.split(&text);

    // chunk[1] re-opens with the tail of chunk[0]; sentence rounding may
    // shave off up to one sentence (50 chars) from the nominal 512.
    let tail: String = chunks[0]
        .chars()
        .skip(chunks[0].chars().count() - 500)
        .collect();
    assert!(chunks[1].starts_with(&tail));
}

#[test]
fn boundary_free_text_falls_back_to_hard_windows() {
    let splitter = SentenceSplitter::new(1024, 512);
    let text = "y".repeat(1500);

    let chunks = splitter.split(&text);
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].chars().count(), 1024);
    assert_eq!(chunks[1].chars().count(), 988);
    // Hard windows step by chunk_size - overlap, so the second starts at
    // offset 512 and the two overlap by exactly 512.
    assert_eq!(&chunks[1][..512], &chunks[0][512..]);
}

#[test]
fn sentences_longer_than_the_overlap_still_produce_overlapping_chunks() {
    let splitter = SentenceSplitter::new(1024, 512);
    // Four distinct 600-char sentences; no two fit one chunk together, and
    // none fits whole inside the 512-char overlap budget.
    let text: String = (0..4)
        .map(|i| format!("{}. ", char::from(b'a' + i as u8).to_string().repeat(598)))
        .collect();

    let chunks = splitter.split(&text);
    assert_eq!(chunks.len(), 4);
    assert!(chunks.iter().all(|c| c.chars().count() <= 1024));

    for pair in chunks.windows(2) {
        let shared = (1..=pair[0].len())
            .rev()
            .find(|&n| pair[1].starts_with(&pair[0][pair[0].len() - n..]))
            .unwrap_or(0);
        // Nominal 512 clamped so the next 600-char sentence still fits:
        // 1024 - 600 = 424.
        assert_eq!(shared, 424);
    }
}

#[test]
fn chunks_union_cover_the_input() {
    let splitter = SentenceSplitter::new(100, 40);
    // Unique sentences so each chunk occurs exactly once in the input.
    let full: String = (0..20)
        .map(|i| format!("Sentence number {i} carries a few words. "))
        .collect();

    let chunks = splitter.split(&full);
    assert!(!chunks.is_empty());

    // Every chunk is a contiguous substring; walked left to right they must
    // leave no gap and together reach the end of the input.
    let mut search_from = 0usize;
    let mut covered_end = 0usize;
    for chunk in &chunks {
        let start = full[search_from..]
            .find(chunk.as_str())
            .map(|i| i + search_from)
            .expect("chunk text must occur in the input");
        assert!(start <= covered_end, "gap in coverage before offset {covered_end}");
        covered_end = covered_end.max(start + chunk.len());
        search_from = start;
    }
    assert_eq!(covered_end, full.len());
}

#[test]
fn splitting_is_deterministic() {
    let splitter = SentenceSplitter::new(128, 32);
    let text = fifty_char_sentences(12);
    assert_eq!(splitter.split(&text), splitter.split(&text));
}

#[test]
fn never_produces_empty_chunks() {
    let splitter = SentenceSplitter::new(16, 8);
    let text = "Tiny. Bits. Of. Text. With. Many. Boundaries. And one longer run of words.";
    for chunk in splitter.split(text) {
        assert!(!chunk.is_empty());
    }
}

#[test]
fn empty_input_yields_no_chunks() {
    let splitter = SentenceSplitter::new(1024, 512);
    assert!(splitter.split("").is_empty());
}
