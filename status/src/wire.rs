//! Status word wire encoding, two bytes big-endian trailing response data

use encdec::{DecodeOwned, Encode};

use crate::{Error, StatusCode, StatusWord};

/// Encoded status word length
pub const STATUS_LEN: usize = 2;

impl Encode for StatusWord {
    type Error = Error;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(STATUS_LEN)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
        if buff.len() < STATUS_LEN {
            return Err(Error::InvalidLength);
        }

        buff[..STATUS_LEN].copy_from_slice(&self.value().to_be_bytes());

        Ok(STATUS_LEN)
    }
}

impl DecodeOwned for StatusWord {
    type Output = Self;

    type Error = Error;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        if buff.len() < STATUS_LEN {
            return Err(Error::InvalidLength);
        }

        Ok((StatusWord::from_bytes([buff[0], buff[1]]), STATUS_LEN))
    }
}

/// [Encode] implementation for [StatusCode], identical to the matching [StatusWord]
impl Encode for StatusCode {
    type Error = Error;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(STATUS_LEN)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
        StatusWord::from(*self).encode(buff)
    }
}

/// Split a device response into payload and trailing status word
pub fn split_response(buff: &[u8]) -> Result<(&[u8], StatusWord), Error> {
    if buff.len() < STATUS_LEN {
        return Err(Error::InvalidLength);
    }

    let (data, status) = buff.split_at(buff.len() - STATUS_LEN);
    let (sw, _) = StatusWord::decode_owned(status)?;

    Ok((data, sw))
}
