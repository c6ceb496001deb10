//! All the supported sentence type data and parsers.

mod dtm;
mod gbs;
mod gga;
mod gll;
mod gns;
mod grs;
mod gsa;
mod gst;
mod gsv;
mod poll;
mod rlm;
mod rmc;
mod txt;
mod vlw;
mod vtg;
mod zda;

mod constellation;
pub mod groups;
pub(crate) mod utils;

pub use {
    constellation::Constellation,
    dtm::{DtmData, parse_dtm},
    gbs::{GbsData, parse_gbs},
    gga::{FixQuality, GgaData, parse_gga},
    gll::{GllData, parse_gll},
    gns::{GnsData, parse_gns},
    grs::{GRS_RESIDUAL_SLOTS, GrsData, parse_grs},
    groups::{Altitude, MsgPoll, Position, Position3d, UtcTime},
    gsa::{GSA_SATELLITE_SLOTS, GsaData, parse_gsa},
    gst::{GstData, parse_gst},
    gsv::{GSV_MAX_GROUPS, GsvData, SatInfo, parse_gsv},
    poll::{PollData, parse_poll},
    rlm::{RlmData, parse_rlm},
    rmc::{DATE_STR_LEN, RmcData, parse_rmc},
    txt::{TEXT_STR_LEN, TxtData, parse_txt},
    utils::deg_min_to_dec_deg,
    vlw::{VlwData, parse_vlw},
    vtg::{VtgData, parse_vtg},
    zda::{ZdaData, parse_zda},
};
