pub mod sox;

/// Copy signed 8 bit samples to bytes in the two's complement layout raw PCM streams expect.
///
/// Returns the number of samples that were actually copied.
/// Might be less than the number of input samples if the output buffer was not large enough.
pub fn copy_i8_bytes(samples: &[i8], bytes: &mut [u8]) -> usize {
    let mut processed = 0;
    for (sample, target) in samples.iter().zip(bytes.iter_mut()) {
        *target = sample.to_le_bytes()[0];
        processed += 1;
    }
    processed
}
