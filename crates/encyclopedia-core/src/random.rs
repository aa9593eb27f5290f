//! Random entry selection

use rand::Rng;

use crate::error::{EntryError, EntryResult};

/// Pick a title uniformly at random
///
/// Fails with [`EntryError::EmptyCollection`] when there is nothing to pick.
pub fn pick_random<'a, S, R>(titles: &'a [S], rng: &mut R) -> EntryResult<&'a str>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    if titles.is_empty() {
        return Err(EntryError::EmptyCollection);
    }
    let index = rng.gen_range(0..titles.len());
    Ok(titles[index].as_ref())
}
