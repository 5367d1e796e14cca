use rayon::prelude::*;
use thiserror::Error;

/// Number of buffer elements from which [`ExecutionStrategy::Auto`] switches to parallel.
pub const AUTO_PARALLEL_THRESHOLD: usize = 100_000;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The line length must be valid for a non-empty buffer.
    #[error("line length must be > 0 and divide the buffer length ({1}), got {0}")]
    InvalidLineLength(usize, usize),
}

/// Controls how line-oriented operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run in parallel for buffers of at least [`AUTO_PARALLEL_THRESHOLD`] elements, serially
    /// otherwise.
    #[default]
    Auto,

    /// Use the global Rayon thread pool to process every line in parallel.
    Parallel,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Whether the strategy processes a buffer of `num_elements` in parallel.
    pub fn is_parallel(&self, num_elements: usize) -> bool {
        match self {
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel | ExecutionStrategy::Fixed(_) => true,
            ExecutionStrategy::Auto => num_elements >= AUTO_PARALLEL_THRESHOLD,
        }
    }
}

/// Apply a function to every line of a buffer with the given strategy.
///
/// The buffer is split into disjoint mutable lines of `line_len` elements and `op` receives the
/// line index together with the line. Every line has been processed when this function returns.
///
/// # Arguments
///
/// * `strategy` - The execution strategy.
/// * `buffer` - The buffer to split into lines.
/// * `line_len` - The number of elements of each line.
/// * `op` - The operation to perform on each (index, line) pair.
///
/// # Errors
///
/// Returns an error if `line_len` does not split the buffer into whole lines, or if the thread
/// pool for [`ExecutionStrategy::Fixed`] cannot be built.
pub fn for_each_line<T, F>(
    strategy: ExecutionStrategy,
    buffer: &mut [T],
    line_len: usize,
    op: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if buffer.is_empty() {
        return Ok(());
    }

    if line_len == 0 || buffer.len() % line_len != 0 {
        return Err(ParallelError::InvalidLineLength(line_len, buffer.len()));
    }

    match strategy {
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                buffer
                    .par_chunks_mut(line_len)
                    .enumerate()
                    .for_each(|(i, line)| op(i, line));
            });
        }
        s if s.is_parallel(buffer.len()) => {
            buffer
                .par_chunks_mut(line_len)
                .enumerate()
                .for_each(|(i, line)| op(i, line));
        }
        _ => {
            buffer
                .chunks_mut(line_len)
                .enumerate()
                .for_each(|(i, line)| op(i, line));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double_with_offset(i: usize, line: &mut [usize]) {
        line.iter_mut().for_each(|v| *v = *v * 2 + i);
    }

    #[test]
    fn test_for_each_line_serial() -> Result<(), ParallelError> {
        let mut buf = vec![1, 2, 3, 4];
        for_each_line(ExecutionStrategy::Serial, &mut buf, 2, double_with_offset)?;
        assert_eq!(buf, vec![2, 4, 7, 9]);
        Ok(())
    }

    #[test]
    fn test_for_each_line_parallel() -> Result<(), ParallelError> {
        let mut buf = vec![1, 2, 3, 4];
        for_each_line(ExecutionStrategy::Parallel, &mut buf, 2, double_with_offset)?;
        assert_eq!(buf, vec![2, 4, 7, 9]);
        Ok(())
    }

    #[test]
    fn test_for_each_line_auto() -> Result<(), ParallelError> {
        let mut buf = vec![1, 2, 3, 4];
        for_each_line(ExecutionStrategy::Auto, &mut buf, 1, double_with_offset)?;
        assert_eq!(buf, vec![2, 5, 8, 11]);
        Ok(())
    }

    #[test]
    fn test_for_each_line_fixed_success() -> Result<(), ParallelError> {
        let mut buf = vec![1, 2, 3, 4];
        for_each_line(ExecutionStrategy::Fixed(2), &mut buf, 2, double_with_offset)?;
        assert_eq!(buf, vec![2, 4, 7, 9]);
        Ok(())
    }

    #[test]
    fn test_for_each_line_fixed_error() {
        let mut buf = vec![1];
        let res = for_each_line(ExecutionStrategy::Fixed(0), &mut buf, 1, |_, _| {});
        assert_eq!(res, Err(ParallelError::InvalidThreadCount(0)));
    }

    #[test]
    fn test_for_each_line_invalid_length() {
        let mut buf = vec![1, 2, 3];
        let res = for_each_line(ExecutionStrategy::Serial, &mut buf, 2, |_, _| {});
        assert_eq!(res, Err(ParallelError::InvalidLineLength(2, 3)));

        let res = for_each_line(ExecutionStrategy::Serial, &mut buf, 0, |_, _| {});
        assert_eq!(res, Err(ParallelError::InvalidLineLength(0, 3)));
    }

    #[test]
    fn test_for_each_line_empty() -> Result<(), ParallelError> {
        let mut buf: Vec<u8> = vec![];
        for_each_line(ExecutionStrategy::Parallel, &mut buf, 0, |_, _| {})?;
        Ok(())
    }

    #[test]
    fn test_is_parallel() {
        assert!(!ExecutionStrategy::Serial.is_parallel(usize::MAX));
        assert!(ExecutionStrategy::Parallel.is_parallel(1));
        assert!(ExecutionStrategy::Fixed(4).is_parallel(1));
        assert!(!ExecutionStrategy::Auto.is_parallel(AUTO_PARALLEL_THRESHOLD - 1));
        assert!(ExecutionStrategy::Auto.is_parallel(AUTO_PARALLEL_THRESHOLD));
    }
}
