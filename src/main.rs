#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    desa_wisata_portal::run().await
}
