use std::io::{self, Read, Write};

/// Copy block size: 16 disk blocks of 4 KiB.
pub const BLOCK_SIZE: u64 = 4096 * 16;

/// Progress snapshot passed to the copy callback after each block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyProgress {
    /// Total number of bytes being copied.
    pub total: u64,
    /// Bytes copied so far, including this block.
    pub so_far: u64,
    /// Bytes copied by this block.
    pub since_last: u64,
}

/// Copies exactly `size` bytes from `src` to `dst` in [`BLOCK_SIZE`] blocks.
///
/// `on_progress` runs after every block. Bytes past `size` in `src` are
/// never read. A source that ends before `size` bytes yields
/// [`io::ErrorKind::UnexpectedEof`].
pub fn copy_file_contents<R, W, F>(size: u64, src: &mut R, dst: &mut W, on_progress: F) -> io::Result<()>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
    F: FnMut(CopyProgress),
{
    copy_in_blocks(size, BLOCK_SIZE, src, dst, on_progress)
}

fn copy_in_blocks<R, W, F>(
    size: u64,
    block_size: u64,
    src: &mut R,
    dst: &mut W,
    mut on_progress: F,
) -> io::Result<()>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
    F: FnMut(CopyProgress),
{
    let mut buf = vec![0u8; block_size.min(size) as usize];
    let mut bytes_left = size;

    while bytes_left > 0 {
        let next = block_size.min(bytes_left);
        let block = &mut buf[..next as usize];

        src.read_exact(block).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("source ended with {bytes_left} of {size} bytes left to copy"),
                )
            } else {
                e
            }
        })?;
        dst.write_all(block)?;

        bytes_left -= next;
        on_progress(CopyProgress {
            total: size,
            so_far: size - bytes_left,
            since_last: next,
        });
    }

    Ok(())
}
