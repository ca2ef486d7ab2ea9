/// Serial port as seen by test ROMs.
///
/// Only the transfer start used by test ROMs is modelled: writing 0x81 to
/// SC captures the byte in SB. SC itself keeps whatever was written.
#[derive(Clone, Debug, Default)]
pub(crate) struct Serial {
    output: Vec<u8>,
}

impl Serial {
    pub(super) fn write_sc(&mut self, sb: u8, sc: u8) {
        if sc == 0x81 {
            log::info!("GB serial: 0x{:02X} {:?}", sb, sb as char);
            self.output.push(sb);
        }
    }

    pub(super) fn output(&self) -> &[u8] {
        &self.output
    }
}
