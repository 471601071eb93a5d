use s4pi_catalog::{CatalogError, ResourceKey, TgiLayout, TgiReference};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const SAMPLE: TgiReference = TgiReference::new(0x01661233, 0x00000001, 0xAABBCCDD11223344);

#[test]
fn test_tgi_layouts_wire_order() -> anyhow::Result<()> {
    init_logger();

    let mut tgi = Vec::new();
    SAMPLE.encode(&mut tgi, TgiLayout::Tgi)?;
    assert_eq!(&tgi[0..4], &0x01661233u32.to_le_bytes());
    assert_eq!(&tgi[4..8], &1u32.to_le_bytes());
    assert_eq!(&tgi[8..16], &0xAABBCCDD11223344u64.to_le_bytes());

    let mut itg = Vec::new();
    SAMPLE.encode(&mut itg, TgiLayout::Itg)?;
    assert_eq!(&itg[0..8], &0xAABBCCDD11223344u64.to_le_bytes());
    assert_eq!(&itg[8..12], &0x01661233u32.to_le_bytes());
    assert_eq!(&itg[12..16], &1u32.to_le_bytes());

    let mut swapped = Vec::new();
    SAMPLE.encode(&mut swapped, TgiLayout::SwappedItg)?;
    assert_eq!(&swapped[0..8], &0x11223344AABBCCDDu64.to_le_bytes());
    assert_eq!(&swapped[8..16], &itg[8..16]);
    Ok(())
}

#[test]
fn test_tgi_round_trip_every_layout() -> anyhow::Result<()> {
    for layout in [TgiLayout::Tgi, TgiLayout::Itg, TgiLayout::SwappedItg] {
        let mut data = Vec::new();
        let written = SAMPLE.encode(&mut data, layout)?;
        assert_eq!(written, TgiReference::SIZE);

        let (decoded, consumed) = TgiReference::decode(&data, 0, layout)?;
        assert_eq!(consumed, TgiReference::SIZE);
        assert_eq!(decoded, SAMPLE, "layout {layout:?}");
    }
    Ok(())
}

#[test]
fn test_tgi_encode_appends() -> anyhow::Result<()> {
    let mut data = vec![0xEE; 3];
    SAMPLE.encode(&mut data, TgiLayout::Itg)?;
    TgiReference::EMPTY.encode(&mut data, TgiLayout::Itg)?;
    assert_eq!(data.len(), 3 + 2 * TgiReference::SIZE);

    let (first, _) = TgiReference::decode(&data, 3, TgiLayout::Itg)?;
    let (second, _) = TgiReference::decode(&data, 3 + TgiReference::SIZE, TgiLayout::Itg)?;
    assert_eq!(first, SAMPLE);
    assert!(second.is_empty());
    Ok(())
}

#[test]
fn test_tgi_decode_short_buffer() {
    let data = [0u8; 15];
    let err = TgiReference::decode(&data, 0, TgiLayout::Itg).unwrap_err();
    assert_eq!(err, CatalogError::UnexpectedEndOfData { offset: 15 });
}

#[test]
fn test_resource_key_conversion_and_display() {
    let key = ResourceKey::new(0x319E4F1D, 0x80000000, 0x00000000DEADBEEF);
    assert_eq!(key.to_string(), "319E4F1D:80000000:00000000DEADBEEF");

    let tgi = TgiReference::from(key);
    assert_eq!(ResourceKey::from(tgi), key);
    assert!(!tgi.is_empty());
    assert!(TgiReference::default().is_empty());
}
