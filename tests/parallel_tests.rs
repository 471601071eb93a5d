use rayon::prelude::*;
use s4pi_catalog::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn round_trip<T: CatalogResource + Resource>(instance: u64, resource: T) -> anyhow::Result<()> {
    let key = ResourceKey::new(T::RESOURCE_TYPE, 0, instance);
    let bytes = resource.to_bytes()?;
    let decoded = T::from_bytes(&key, &bytes)?;
    anyhow::ensure!(decoded.to_bytes()? == bytes, "{key} did not round trip");
    Ok(())
}

#[test]
fn test_parallel_decode_encode() -> anyhow::Result<()> {
    init_logger();

    // Codecs hold no shared state, so independent resources can be processed from any thread.
    (0..256u64).into_par_iter().try_for_each(|i| -> anyhow::Result<()> {
        let mut wall = CwalResource::default();
        wall.unk01 = i as u32;
        wall.colors = ColorList::new((0..(i % 5) as u32).collect());
        round_trip(i, wall)?;

        let mut object = CobjResource::default();
        object.base.common.price = i as u32;
        object.base.common.tags = CatalogTagList::new(vec![i as u32; (i % 4) as usize]);
        round_trip(i, object)?;

        let mut ceiling = CceiResource::default();
        ceiling.unk01 = (i % 256) as u8;
        round_trip(i, ceiling)?;

        let mut objd = ObjectDefinitionResource::default();
        objd.set_name(format!("object_{i}"));
        objd.set_simoleon_price(i as u32);
        let bytes = objd.to_bytes()?;
        let key = ResourceKey::new(ObjectDefinitionResource::RESOURCE_TYPE, 0, i);
        anyhow::ensure!(ObjectDefinitionResource::from_bytes(&key, &bytes)? == objd);
        Ok(())
    })
}
