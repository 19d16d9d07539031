//! Chain - runs transformers in sequence over one stream.

use tracing::trace;

use crate::buffer::Buffer;
use crate::config::DEFAULT_LINK_CAPACITY;
use crate::replacer::Replacer;
use crate::transform::{Backpressure, Progress, Transformer};

/// An ordered pipeline of transformers.
///
/// Stage `k` reads the output stream of stage `k - 1` and the last stage
/// writes into the caller's destination buffer. Stages are connected by
/// fixed-size link buffers; each call keeps pushing data down the chain
/// until nothing more moves.
///
/// Every stage owns its own state, so the chain is equivalent to running the
/// stages one after another over the whole stream: a later stage only ever
/// sees text already rewritten by the earlier ones.
///
/// # Example
///
/// ```
/// use replacers::{transform_bytes, Chain, Replacer};
///
/// let mut chain = Chain::new(vec![
///     Replacer::from_text("Hello", "Hi"),
///     Replacer::from_text("World", "Gophers"),
/// ]);
///
/// assert_eq!(transform_bytes(&mut chain, b"Hello, World"), &b"Hi, Gophers"[..]);
/// ```
#[derive(Debug)]
pub struct Chain<T = Replacer> {
    stages: Vec<T>,
    links: Vec<Buffer>,
    finished: Vec<bool>,
    signals: Vec<Option<Backpressure>>,
    link_capacity: usize,
}

impl<T: Transformer> Chain<T> {
    /// Creates a chain with the default link capacity.
    pub fn new(stages: Vec<T>) -> Self {
        Self::with_link_capacity(stages, DEFAULT_LINK_CAPACITY)
    }

    /// Creates a chain whose inter-stage buffers hold `link_capacity` bytes.
    ///
    /// A zero capacity is raised to 1 so the chain can still make progress.
    pub fn with_link_capacity(stages: Vec<T>, link_capacity: usize) -> Self {
        let link_capacity = link_capacity.max(1);
        let n = stages.len();
        Self {
            links: (1..n).map(|_| Buffer::take(link_capacity)).collect(),
            finished: vec![false; n],
            signals: vec![None; n],
            stages,
            link_capacity,
        }
    }

    /// Appends a stage to the end of the chain.
    pub fn push(&mut self, stage: T) {
        if !self.stages.is_empty() {
            self.links.push(Buffer::take(self.link_capacity));
        }
        self.stages.push(stage);
        self.finished.push(false);
        self.signals.push(None);
    }

    /// Returns the number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the chain has no stages and copies input unchanged.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Returns the stages in order.
    pub fn stages(&self) -> &[T] {
        &self.stages
    }

    /// Returns stage `index`, if any.
    pub fn stage(&self, index: usize) -> Option<&T> {
        self.stages.get(index)
    }

    /// Returns the number of bytes sitting in link buffers between stages.
    pub fn buffered(&self) -> usize {
        self.links.iter().map(Buffer::len).sum()
    }

    /// Consumes the chain and returns its stages.
    pub fn into_stages(self) -> Vec<T> {
        self.stages
    }

    /// Runs stage `k` once and moves its input and output cursors.
    ///
    /// Returns true if any byte moved or the stage just finished.
    fn step(
        &mut self,
        k: usize,
        dst: &mut [u8],
        written: &mut usize,
        src: &[u8],
        consumed: &mut usize,
        at_eof: bool,
    ) -> bool {
        let last = self.stages.len() - 1;
        let in_eof = if k == 0 { at_eof } else { self.finished[k - 1] };

        let progress = {
            let (upstream, downstream) = self.links.split_at_mut(k);
            let input = match k {
                0 => &src[*consumed..],
                _ => upstream[k - 1].filled(),
            };
            let output = if k == last {
                &mut dst[*written..]
            } else {
                let link = &mut downstream[0];
                link.compact();
                link.spare_mut()
            };
            self.stages[k].transform(output, input, in_eof)
        };

        let input_drained = match k {
            0 => {
                *consumed += progress.consumed;
                *consumed == src.len()
            }
            _ => {
                self.links[k - 1].consume(progress.consumed);
                self.links[k - 1].is_empty()
            }
        };
        match k == last {
            true => *written += progress.written,
            false => self.links[k].commit(progress.written),
        }

        self.signals[k] = progress.backpressure;
        let mut moved = progress.written > 0 || progress.consumed > 0;

        if in_eof && input_drained && progress.backpressure.is_none() && !self.finished[k] {
            self.finished[k] = true;
            moved = true;
        }

        moved
    }
}

impl<T: Transformer> Transformer for Chain<T> {
    /// Pushes `src` through every stage, writing the last stage's output
    /// into `dst`.
    ///
    /// Returns `ShortDst` if some stage is blocked on output space (for
    /// inner stages that means the links are full because `dst` is),
    /// otherwise `ShortSrc` if some stage is holding back a possible match.
    fn transform(&mut self, dst: &mut [u8], src: &[u8], at_eof: bool) -> Progress {
        if self.stages.is_empty() {
            let n = src.len().min(dst.len());
            dst[..n].copy_from_slice(&src[..n]);
            return match n < src.len() {
                true => Progress::short_dst(n, n),
                false => Progress::done(n, n),
            };
        }

        let mut written = 0;
        let mut consumed = 0;

        loop {
            let mut moved = false;
            for k in 0..self.stages.len() {
                moved |= self.step(k, dst, &mut written, src, &mut consumed, at_eof);
            }
            if !moved {
                break;
            }
        }

        let blocked_on = |signal: Backpressure| self.signals.iter().any(|s| *s == Some(signal));

        if blocked_on(Backpressure::ShortDst) {
            trace!(
                written,
                consumed,
                buffered = self.buffered(),
                "chain blocked on destination space"
            );
            Progress::short_dst(written, consumed)
        } else if blocked_on(Backpressure::ShortSrc) || consumed < src.len() {
            Progress::short_src(written, consumed)
        } else {
            Progress::done(written, consumed)
        }
    }

    /// Resets every stage and empties the links.
    fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
        for link in &mut self.links {
            link.clear();
        }
        self.finished.fill(false);
        self.signals.fill(None);
    }
}

impl<T: Transformer> FromIterator<T> for Chain<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
