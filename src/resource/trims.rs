//! Edge and trim pieces: fences, railings, spandrels, friezes and roof parts.

use binrw::binrw;

use crate::tgi::{TgiLayout, TgiReference};

use super::lists::ColorList;
use super::shapes::SimpleCatalogResource;
use super::value::TaggedValueList;
use super::CatalogResource;

/// Fence resource (0x0418FE2A)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CfenResource {
    pub base: SimpleCatalogResource,
    #[brw(args(TgiLayout::Itg))]
    pub post_model_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub tile_spacing1_model_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub tile_spacing2_model_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub tile_spacing4_model_ref: TgiReference,
    pub material_variant: u32,
    pub swatch_grouping: u64,
    pub colors: ColorList,
}

impl CatalogResource for CfenResource {
    const RESOURCE_TYPE: u32 = 0x0418FE2A;
}

/// Railing resource (0x1C1CF1F7)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CralResource {
    pub base: SimpleCatalogResource,
    #[brw(args(TgiLayout::Itg))]
    pub post_model_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub post_end_model_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub rail_model_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub rail_end_model_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub stair_post_model_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub stair_post_end_model_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub stair_rail_model_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub stair_rail_end_model_ref: TgiReference,
    pub material_variant: u32,
    pub swatch_grouping: u64,
    pub colors: ColorList,
}

impl CatalogResource for CralResource {
    const RESOURCE_TYPE: u32 = 0x1C1CF1F7;
}

/// The nine models a spandrel is stretched from, in row order.
#[binrw]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct NineSliceModels {
    #[brw(args(TgiLayout::Itg))]
    pub top_left: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub top: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub top_right: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub left: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub center: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub right: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub bottom_left: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub bottom: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub bottom_right: TgiReference,
}

/// Spandrel resource (0x3F0C529A)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq)]
#[brw(little)]
pub struct CspnResource {
    pub base: SimpleCatalogResource,
    pub models: NineSliceModels,
    pub unk01: u8,
    pub material_variant: u32,
    pub swatch_grouping: u64,
    pub colors: ColorList,
    pub properties: TaggedValueList,
}

impl CatalogResource for CspnResource {
    const RESOURCE_TYPE: u32 = 0x3F0C529A;
}

/// Frieze resource (0xA057811C)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CfrzResource {
    pub base: SimpleCatalogResource,
    #[brw(args(TgiLayout::Itg))]
    pub model_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub trim_ref: TgiReference,
    pub material_variant: u32,
    pub swatch_grouping: u64,
    pub colors: ColorList,
}

impl CatalogResource for CfrzResource {
    const RESOURCE_TYPE: u32 = 0xA057811C;
}

/// First floor trim version carrying the corner trim reference.
pub const CORNER_TRIM_VERSION: u32 = 0x0A;

/// Floor trim resource (0x84C23219)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CfltResource {
    pub base: SimpleCatalogResource,
    #[brw(args(TgiLayout::Itg))]
    pub trim_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub model_ref: TgiReference,
    pub material_variant: u32,
    pub swatch_grouping: u64,
    pub colors: ColorList,
    #[brw(if(base.version >= CORNER_TRIM_VERSION), args(TgiLayout::Itg))]
    pub corner_trim_ref: TgiReference,
}

impl CfltResource {
    pub fn has_corner_trim_ref(&self) -> bool {
        self.base.version >= CORNER_TRIM_VERSION
    }
}

impl CatalogResource for CfltResource {
    const RESOURCE_TYPE: u32 = 0x84C23219;
}

/// Roof trim resource (0xB0311D0F)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq)]
#[brw(little)]
pub struct CrtrResource {
    pub base: SimpleCatalogResource,
    #[brw(args(TgiLayout::Itg))]
    pub trim_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub model_ref: TgiReference,
    pub material_variant: u32,
    pub swatch_grouping: u64,
    pub colors: ColorList,
    pub trim_height: f32,
}

impl CatalogResource for CrtrResource {
    const RESOURCE_TYPE: u32 = 0xB0311D0F;
}

/// Roof pattern resource (0xF1EDBD86)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CrptResource {
    pub base: SimpleCatalogResource,
    #[brw(args(TgiLayout::Itg))]
    pub roof_material_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub ceiling_material_ref: TgiReference,
    pub material_variant: u32,
    pub swatch_grouping: u64,
    pub colors: ColorList,
}

impl CatalogResource for CrptResource {
    const RESOURCE_TYPE: u32 = 0xF1EDBD86;
}
