//! Encode/decode matrix construction and inversion over GF(2^8).
//!
//! Matrices are dense row-major `Vec<u8>` buffers; a (rows x cols) matrix
//! stores element (r, c) at `r * cols + c`. The encode matrix starts as a
//! Vandermonde matrix `V[r][c] = alpha^((r - 1) * c)` with a special-cased
//! `[1, 0, .., 0]` top row, which guarantees any k rows stay linearly
//! independent for n <= 256.

use crate::bytes;
use crate::gf::{self, GfTables};

/// Inversion found no usable pivot. For a decode matrix this means the
/// caller's shard selection cannot span the data; for the Vandermonde
/// construction it cannot happen with distinct row generators.
#[derive(Debug)]
pub(crate) struct SingularMatrix;

/// Build the n x k encode matrix: identity on top, Vandermonde-derived
/// parity rows below.
pub(crate) fn create_encode_matrix(tables: &GfTables, k: usize, n: usize) -> Vec<u8> {
    debug_assert!(k >= 1 && k <= n && n <= 256);

    // Vandermonde rows for generators 0, alpha^0, alpha^1, ... The zero
    // generator's row is [1, 0, .., 0] and cannot come out of the exp table.
    let mut tmp = vec![0u8; n * k];
    tmp[0] = 1;
    for row in 0..n - 1 {
        for col in 0..k {
            tmp[(row + 1) * k + col] = tables.alpha_pow(row * col);
        }
    }

    invert_vandermonde(tables, &mut tmp[..k * k], k);

    let mut enc = vec![0u8; n * k];
    matmul(tables, &tmp[k * k..], &tmp[..k * k], &mut enc[k * k..], n - k, k, k);

    // The top of the systematic matrix is the identity; no need to multiply.
    for col in 0..k {
        enc[col * k + col] = 1;
    }

    enc
}

/// Gather rows `idx[i]` of the encode matrix and invert the result in place.
pub(crate) fn create_decode_matrix(
    tables: &GfTables,
    enc: &[u8],
    idx: &[u16],
    k: usize,
) -> Result<Vec<u8>, SingularMatrix> {
    let mut m = vec![0u8; k * k];
    for (i, &row) in idx.iter().enumerate() {
        let src = row as usize * k;
        m[i * k..(i + 1) * k].copy_from_slice(&enc[src..src + k]);
    }
    invert_matrix(tables, &mut m, k)?;
    Ok(m)
}

/// `c = a * b` for an (n x k) `a` and a (k x m) `b`.
fn matmul(tables: &GfTables, a: &[u8], b: &[u8], c: &mut [u8], n: usize, k: usize, m: usize) {
    for row in 0..n {
        for col in 0..m {
            let mut acc = 0u8;
            for i in 0..k {
                acc ^= tables.mul(a[row * k + i], b[i * m + col]);
            }
            c[row * m + col] = acc;
        }
    }
}

/// In-place Gauss-Jordan inversion with full pivoting.
///
/// Row and column swaps are tracked in `indxr`/`indxc` and the column swaps
/// are undone in reverse once elimination finishes.
pub(crate) fn invert_matrix(
    tables: &GfTables,
    m: &mut [u8],
    k: usize,
) -> Result<(), SingularMatrix> {
    debug_assert_eq!(m.len(), k * k);

    let mut indxc = vec![0usize; k];
    let mut indxr = vec![0usize; k];
    // Marks rows/columns already consumed as pivots.
    let mut ipiv = vec![0u8; k];

    let mut id_row = vec![0u8; k];
    let mut pivot_row = vec![0u8; k];

    for col in 0..k {
        // Find a non-zero pivot for this column, preferring the diagonal.
        let mut irow = usize::MAX;
        let mut icol = usize::MAX;

        if ipiv[col] != 1 && m[col * k + col] != 0 {
            irow = col;
            icol = col;
        } else {
            'search: for row in 0..k {
                if ipiv[row] == 1 {
                    continue;
                }
                for ix in 0..k {
                    match ipiv[ix] {
                        0 => {
                            if m[row * k + ix] != 0 {
                                irow = row;
                                icol = ix;
                                break 'search;
                            }
                        }
                        1 => {}
                        _ => return Err(SingularMatrix),
                    }
                }
            }
        }

        if icol == usize::MAX {
            return Err(SingularMatrix);
        }

        ipiv[icol] += 1;

        // Swap rows so the pivot lands on the diagonal.
        if irow != icol {
            for ix in 0..k {
                m.swap(irow * k + ix, icol * k + ix);
            }
        }

        indxr[col] = irow;
        indxc[col] = icol;

        let pivot_base = icol * k;
        let mut c = m[pivot_base + icol];
        if c == 0 {
            return Err(SingularMatrix);
        }

        // Normalize the pivot row.
        if c != 1 {
            c = tables.inv(c);
            m[pivot_base + icol] = 1;
            for ix in 0..k {
                m[pivot_base + ix] = tables.mul(c, m[pivot_base + ix]);
            }
        }

        // Clear this column from every other row. When the pivot row is an
        // identity row the subtraction is a no-op for all of them.
        id_row[icol] = 1;
        if !bytes::equals(&m[pivot_base..pivot_base + k], &id_row) {
            pivot_row.copy_from_slice(&m[pivot_base..pivot_base + k]);
            for ix in 0..k {
                if ix == icol {
                    continue;
                }
                let base = ix * k;
                let c = m[base + icol];
                m[base + icol] = 0;
                gf::mul_add_scalar(tables, &mut m[base..base + k], &pivot_row, c);
            }
        }
        id_row[icol] = 0;
    }

    // Undo the column swaps in reverse order.
    for col in (0..k).rev() {
        if indxr[col] != indxc[col] {
            for row in 0..k {
                m.swap(row * k + indxc[col], row * k + indxr[col]);
            }
        }
    }

    Ok(())
}

/// Fast in-place inversion for the Vandermonde construction matrix, via the
/// coefficients of `P(x) = prod (x - p_i)` and synthetic division. Only used
/// while building the encode matrix; decode matrices are arbitrary row
/// selections and go through `invert_matrix`.
fn invert_vandermonde(tables: &GfTables, m: &mut [u8], k: usize) {
    if k == 1 {
        // Degenerate case: the matrix must be [alpha^0] = [1].
        return;
    }

    // Row generators sit in column 1: p[i] = V[i][1].
    let p: Vec<u8> = (0..k).map(|i| m[i * k + 1]).collect();

    // Build the coefficients of P(x) incrementally; c[k] = 1 stays implicit
    // and x - p_i is x + p_i in a field of characteristic 2.
    let mut c = vec![0u8; k];
    c[k - 1] = p[0];
    for i in 1..k {
        let p_i = p[i];
        for j in k - i..k - 1 {
            c[j] ^= tables.mul(p_i, c[j + 1]);
        }
        c[k - 1] ^= p_i;
    }

    let mut b = vec![0u8; k];
    for row in 0..k {
        // Synthetic division of P(x) by (x - p[row]) evaluates both the
        // quotient coefficients and P'(p[row]).
        let xx = p[row];
        let mut t = 1u8;
        b[k - 1] = 1;
        for i in (0..k - 1).rev() {
            b[i] = c[i + 1] ^ tables.mul(xx, b[i + 1]);
            t = tables.mul(xx, t) ^ b[i];
        }

        let t_inv = tables.inv(t);
        for col in 0..k {
            m[col * k + row] = tables.mul(t_inv, b[col]);
        }
    }
}
