/// SPRM opcodes understood by the record decoders.
///
/// # SPRM Structure
///
/// A SPRM consists of:
/// - **Opcode** (2 bytes): Encodes the operation type and size
///   - Bits 0-8: Operation code
///   - Bits 9: Special flag
///   - Bits 10-12: Property group (PAP=1, CHP=2, PIC=3, SEP=4, TAP=5)
///   - Bits 13-15: Size code (determines operand size)
/// - **Operand** (variable): The data for the operation
///
/// Only the opcodes the converter reads are listed; everything else is
/// skipped by the property decoders.

// Character properties

/// sprmCFBold
pub const SPRM_C_F_BOLD: u16 = 0x0835;
/// sprmCFItalic
pub const SPRM_C_F_ITALIC: u16 = 0x0836;
/// sprmCFStrike
pub const SPRM_C_F_STRIKE: u16 = 0x0837;
/// sprmCFSmallCaps
pub const SPRM_C_F_SMALL_CAPS: u16 = 0x083A;
/// sprmCFCaps
pub const SPRM_C_F_CAPS: u16 = 0x083B;
/// sprmCKul - underline code
pub const SPRM_C_KUL: u16 = 0x2A3E;
/// sprmCIco - palette color
pub const SPRM_C_ICO: u16 = 0x2A42;
/// sprmCHps - font size in half-points
pub const SPRM_C_HPS: u16 = 0x4A43;
/// sprmCRgFtc0 - ASCII font index
pub const SPRM_C_RG_FTC0: u16 = 0x4A4F;
/// sprmCCv - COLORREF color
pub const SPRM_C_CV: u16 = 0x6870;

// Paragraph properties

/// sprmPJc80
pub const SPRM_P_JC80: u16 = 0x2403;
/// sprmPFKeep
pub const SPRM_P_F_KEEP: u16 = 0x2405;
/// sprmPFKeepFollow
pub const SPRM_P_F_KEEP_FOLLOW: u16 = 0x2406;
/// sprmPFPageBreakBefore
pub const SPRM_P_F_PAGE_BREAK_BEFORE: u16 = 0x2407;
/// sprmPDxaRight80
pub const SPRM_P_DXA_RIGHT80: u16 = 0x840E;
/// sprmPDxaLeft80
pub const SPRM_P_DXA_LEFT80: u16 = 0x840F;
/// sprmPDxaLeft180 - first line indent
pub const SPRM_P_DXA_LEFT1_80: u16 = 0x8411;
/// sprmPDyaBefore
pub const SPRM_P_DYA_BEFORE: u16 = 0xA413;
/// sprmPDyaAfter
pub const SPRM_P_DYA_AFTER: u16 = 0xA414;
/// sprmPJc
pub const SPRM_P_JC: u16 = 0x2461;
/// sprmPDxaRight
pub const SPRM_P_DXA_RIGHT: u16 = 0x845D;
/// sprmPDxaLeft
pub const SPRM_P_DXA_LEFT: u16 = 0x845E;
/// sprmPDxaLeft1
pub const SPRM_P_DXA_LEFT1: u16 = 0x8460;

// Section properties

/// sprmSBkc - section break code
pub const SPRM_S_BKC: u16 = 0x3009;
/// sprmSFTitlePage - distinct first page
pub const SPRM_S_F_TITLE_PAGE: u16 = 0x300A;
/// sprmSLnc - line numbering restart mode
pub const SPRM_S_LNC: u16 = 0x3013;
/// sprmSGprfIhdt - header/footer presence mask
pub const SPRM_S_GPRF_IHDT: u16 = 0x3014;
/// sprmSNLnnMod - line numbering interval
pub const SPRM_S_N_LNN_MOD: u16 = 0x5015;
/// sprmSDxaLnn - distance of line numbers from text
pub const SPRM_S_DXA_LNN: u16 = 0x9016;
/// sprmSDyaHdrTop
pub const SPRM_S_DYA_HDR_TOP: u16 = 0xB017;
/// sprmSDyaHdrBottom
pub const SPRM_S_DYA_HDR_BOTTOM: u16 = 0xB018;
/// sprmSBOrientation
pub const SPRM_S_B_ORIENTATION: u16 = 0x301D;
/// sprmSXaPage
pub const SPRM_S_XA_PAGE: u16 = 0xB01F;
/// sprmSYaPage
pub const SPRM_S_YA_PAGE: u16 = 0xB020;
/// sprmSDxaLeft
pub const SPRM_S_DXA_LEFT: u16 = 0xB021;
/// sprmSDxaRight
pub const SPRM_S_DXA_RIGHT: u16 = 0xB022;
/// sprmSDyaTop
pub const SPRM_S_DYA_TOP: u16 = 0x9023;
/// sprmSDyaBottom
pub const SPRM_S_DYA_BOTTOM: u16 = 0x9024;
/// sprmSBrcTop80
pub const SPRM_S_BRC_TOP80: u16 = 0x702B;
/// sprmSBrcLeft80
pub const SPRM_S_BRC_LEFT80: u16 = 0x702C;
/// sprmSBrcBottom80
pub const SPRM_S_BRC_BOTTOM80: u16 = 0x702D;
/// sprmSBrcRight80
pub const SPRM_S_BRC_RIGHT80: u16 = 0x702E;
/// sprmSPgbProp - page border scope and offset origin
pub const SPRM_S_PGB_PROP: u16 = 0x522F;
/// sprmSBrcTop
pub const SPRM_S_BRC_TOP: u16 = 0xD234;
/// sprmSBrcLeft
pub const SPRM_S_BRC_LEFT: u16 = 0xD235;
/// sprmSBrcBottom
pub const SPRM_S_BRC_BOTTOM: u16 = 0xD236;
/// sprmSBrcRight
pub const SPRM_S_BRC_RIGHT: u16 = 0xD237;

// Table properties

/// sprmTDefTable - the only SPRM with a two-byte operand length
pub const SPRM_T_DEF_TABLE: u16 = 0xD608;

/// Extract SPRM size code from opcode (bits 13-15).
///
/// Returns:
/// - 0, 1: 1-byte operand
/// - 2, 4, 5: 2-byte operand
/// - 3: 4-byte operand
/// - 6: Variable length
/// - 7: 3-byte operand
#[inline]
pub fn get_sprm_size_code(opcode: u16) -> u8 {
    ((opcode >> 13) & 0x07) as u8
}
