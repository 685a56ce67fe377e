// m24sr/src/protocol/mask.rs

use bitflags::bitflags;

bitflags! {
    /// Fields present in the serialized I-block of a given command kind.
    /// Fields are always emitted in declaration order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldMask: u16 {
        const PCB = 0x0001;
        const CLA = 0x0002;
        const INS = 0x0004;
        const P1 = 0x0008;
        const P2 = 0x0010;
        const LC = 0x0020;
        const DATA = 0x0040;
        const LE = 0x0080;
        const CRC = 0x0100;
        const DID = 0x0200;
    }
}

impl FieldMask {
    /// PCB, CLA, INS, P1, P2 and CRC: the part every command carries.
    const HEADER: Self = Self::PCB
        .union(Self::CLA)
        .union(Self::INS)
        .union(Self::P1)
        .union(Self::P2)
        .union(Self::CRC);

    pub const SELECT_APPLICATION: Self = Self::HEADER
        .union(Self::LC)
        .union(Self::DATA)
        .union(Self::LE);
    pub const SELECT_CC_FILE: Self = Self::HEADER.union(Self::LC).union(Self::DATA);
    pub const SELECT_NDEF_FILE: Self = Self::SELECT_CC_FILE;
    pub const SELECT_SYSTEM_FILE: Self = Self::SELECT_CC_FILE;
    pub const READ_BINARY: Self = Self::HEADER.union(Self::LE);
    pub const UPDATE_BINARY: Self = Self::HEADER.union(Self::LC).union(Self::DATA);
    pub const VERIFY_WITHOUT_PASSWORD: Self = Self::HEADER.union(Self::LC);
    pub const VERIFY_WITH_PASSWORD: Self = Self::HEADER.union(Self::LC).union(Self::DATA);
    pub const CHANGE_REFERENCE_DATA: Self = Self::HEADER.union(Self::LC).union(Self::DATA);
    pub const ENABLE_VERIFICATION_REQUIREMENT: Self = Self::HEADER;
    pub const DISABLE_VERIFICATION_REQUIREMENT: Self = Self::HEADER;
    pub const SEND_INTERRUPT: Self = Self::HEADER.union(Self::LC);
    pub const GPO_STATE: Self = Self::HEADER.union(Self::LC).union(Self::DATA);

    /// A payload region without a length byte cannot be decoded again.
    pub fn is_well_formed(&self) -> bool {
        !self.contains(Self::DATA) || self.contains(Self::LC)
    }
}
