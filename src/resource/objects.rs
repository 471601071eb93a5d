//! Placeable objects. Built either on the Abstract header or on the older Object-style one.

use binrw::binrw;

use crate::tgi::{TgiLayout, TgiReference};

use super::lists::ColorList;
use super::shapes::{AbstractCatalogResource, ObjectCatalogResource};
use super::CatalogResource;

//---------------------------------------------------------------------------//
//                              Abstract-based
//---------------------------------------------------------------------------//

/// Object resource (0x319E4F1D)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CobjResource {
    pub base: AbstractCatalogResource,
}

impl CatalogResource for CobjResource {
    const RESOURCE_TYPE: u32 = 0x319E4F1D;
}

/// Block resource (0x07936CE0)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CblkResource {
    pub base: AbstractCatalogResource,
    #[brw(args(TgiLayout::Itg))]
    pub block_model_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub floor_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub ceiling_ref: TgiReference,
    pub unk01: u8,
}

impl CatalogResource for CblkResource {
    const RESOURCE_TYPE: u32 = 0x07936CE0;
}

/// Fountain trim resource (0xE7ADA79D)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CftrResource {
    pub base: AbstractCatalogResource,
    #[brw(args(TgiLayout::Itg))]
    pub trim_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub model_ref: TgiReference,
    pub unk01: u32,
}

impl CatalogResource for CftrResource {
    const RESOURCE_TYPE: u32 = 0xE7ADA79D;
}

//---------------------------------------------------------------------------//
//                              Object-style
//---------------------------------------------------------------------------//

/// Modular roof resource (0x91EDBD3E)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CrmtResource {
    pub base: ObjectCatalogResource,
    #[brw(args(TgiLayout::Itg))]
    pub model_ref: TgiReference,
    pub colors: ColorList,
    pub swatch_grouping: u64,
}

impl CatalogResource for CrmtResource {
    const RESOURCE_TYPE: u32 = 0x91EDBD3E;
}

/// Window set resource (0xA8F7B517)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CwnsResource {
    pub base: ObjectCatalogResource,
    pub unk01: u32,
    pub colors: ColorList,
}

impl CatalogResource for CwnsResource {
    const RESOURCE_TYPE: u32 = 0xA8F7B517;
}

/// Ceiling resource (0x48C28979)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct CceiResource {
    pub base: ObjectCatalogResource,
    pub unk01: u8,
    pub colors: ColorList,
}

impl CatalogResource for CceiResource {
    const RESOURCE_TYPE: u32 = 0x48C28979;
}

/// Half wall resource (0x74050B1F)
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct ChwlResource {
    pub base: ObjectCatalogResource,
    #[brw(args(TgiLayout::Itg))]
    pub wall_ref: TgiReference,
    #[brw(args(TgiLayout::Itg))]
    pub cap_ref: TgiReference,
    pub colors: ColorList,
}

impl CatalogResource for ChwlResource {
    const RESOURCE_TYPE: u32 = 0x74050B1F;
}
